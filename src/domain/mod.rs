// Domain layer: wine sample model and ports. No external dependencies beyond std/serde.

pub mod model;
pub mod ports;
