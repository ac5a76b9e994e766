use clap::Parser;
use wine_quality::config::toml_config::TomlConfig;
use wine_quality::core::batch::predict_csv;
use wine_quality::core::ConfigProvider;
use wine_quality::utils::validation::{validate_file_extension, validate_socket_addr, Validate};
use wine_quality::utils::logger;
use wine_quality::{web, AppConfig, AppError, AppState, CliConfig, Command, LoadedModel, WineClassifier};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 載入 TOML 配置（可選）
    let file_config = match cli.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "❌ Failed to load config file '{}': {}",
                cli.config.as_deref().unwrap_or_default(),
                e
            );
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let config = AppConfig::merge(
        file_config.as_ref(),
        cli.model.as_deref(),
        cli.bind_override(),
        cli.verbose,
    );

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose, config.log_level.as_deref());
    } else {
        logger::init_cli_logger(config.verbose, config.log_level.as_deref());
    }

    tracing::info!("Starting wine-quality");
    tracing::debug!("Resolved config: {:?}", config);

    // 驗證配置
    let validated = match &file_config {
        Some(file) => file.validate().and_then(|_| config.validate()),
        None => config.validate(),
    };
    if let Err(e) = validated {
        exit_with(&e);
    }

    let result = match &cli.command {
        Command::Serve { .. } => serve(&config).await,
        Command::Predict { input, delimiter } => predict(&config, input, *delimiter),
        Command::Inspect => inspect(&config),
    };

    if let Err(e) = result {
        exit_with(&e);
    }
}

fn exit_with(e: &AppError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}

/// 模型載入失敗時行程不會啟動
fn load_model(config: &AppConfig) -> Result<LoadedModel, AppError> {
    tracing::info!("📁 Loading model from: {}", config.model_path());
    LoadedModel::load(config.model_path())
}

async fn serve(config: &AppConfig) -> Result<(), AppError> {
    let addr = validate_socket_addr("bind", config.bind_addr())?;
    let model = load_model(config)?;
    web::serve(addr, AppState::from_loaded(model)).await
}

fn predict(config: &AppConfig, input: &str, delimiter: char) -> Result<(), AppError> {
    validate_file_extension("input", input, &["csv", "tsv", "txt"])?;
    if !delimiter.is_ascii() {
        return Err(AppError::InvalidConfigValueError {
            field: "delimiter".to_string(),
            value: delimiter.to_string(),
            reason: "Delimiter must be a single ASCII character".to_string(),
        });
    }

    let model = load_model(config)?;
    let classifier = WineClassifier::new(model);
    let file = std::fs::File::open(input)?;
    let report = predict_csv(file, delimiter as u8, &classifier)?;

    println!("row,label,verdict");
    for row in &report.rows {
        match &row.outcome {
            Ok(prediction) => println!("{},{},{}", row.row, prediction.label, prediction.verdict),
            Err(e) => eprintln!("⚠️ Row {} skipped: {}", row.row, e),
        }
    }

    if report.rejected() > 0 {
        return Err(AppError::invalid_input(
            "input",
            input,
            format!("{} of {} rows were rejected", report.rejected(), report.rows.len()),
        ));
    }

    Ok(())
}

fn inspect(config: &AppConfig) -> Result<(), AppError> {
    let model = load_model(config)?;
    let artifact = model.artifact();

    println!("📦 Model: {}", model.source().display());
    println!("Estimator: {}", artifact.kind());
    match artifact.n_features {
        Some(n) => println!("Features: {}", n),
        None => println!("Features: (not declared)"),
    }
    let classes: Vec<String> = artifact.classes.iter().map(ToString::to_string).collect();
    println!("Classes: [{}]", classes.join(", "));

    Ok(())
}
