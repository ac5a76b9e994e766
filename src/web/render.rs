use crate::core::form::{RejectedSubmission, COLUMN_COUNT, FORM_FIELDS};
use crate::core::Verdict;
use std::collections::HashMap;
use std::fmt::Write;

pub const PAGE_TITLE: &str = "Wine Quality Prediction App";
pub const SUBTITLE: &str = "Fill in the wine details below to predict its quality";
pub const SUBMIT_LABEL: &str = "Predict Wine Quality";
pub const FAILURE_MESSAGE: &str = "Something went wrong while predicting. Please try again.";

/// 表單下方的結果區塊
#[derive(Debug)]
pub enum Outcome<'a> {
    Verdict(Verdict),
    Rejected(&'a RejectedSubmission),
    Failed,
}

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0 auto; max-width: 1100px; padding: 1rem 2rem; }
h1 { text-align: center; color: #8B0000; }
h3 { text-align: center; color: #808080; font-weight: normal; }
.columns { display: grid; grid-template-columns: repeat(3, 1fr); gap: 2rem; }
.field { display: flex; flex-direction: column; margin-bottom: 1rem; }
.field input { padding: 0.4rem; font-size: 1rem; }
.field .hint { color: #b00020; font-size: 0.85rem; }
button { margin-top: 1rem; padding: 0.5rem 1.2rem; font-size: 1rem; }
.result { margin-top: 1.5rem; padding: 1rem; border-radius: 0.4rem; }
.success { background: #e6f4ea; color: #1e4620; }
.error { background: #fdecea; color: #611a15; }
footer { text-align: center; color: #808080; }
"#;

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_fields(html: &mut String, values: &HashMap<String, String>, rejected: Option<&RejectedSubmission>) {
    html.push_str("<div class=\"columns\">\n");
    for column in 0..COLUMN_COUNT {
        html.push_str("<div class=\"column\">\n");
        for spec in FORM_FIELDS.iter().filter(|spec| spec.column == column) {
            let value = values
                .get(spec.name)
                .cloned()
                .unwrap_or_else(|| spec.default_value());
            let max = spec
                .max
                .map(|max| format!(" max=\"{}\"", max))
                .unwrap_or_default();

            let _ = write!(
                html,
                "<label class=\"field\">{label}<input type=\"number\" name=\"{name}\" value=\"{value}\" min=\"{min}\"{max} step=\"{step}\" required>",
                label = spec.label,
                name = spec.name,
                value = escape_html(&value),
                min = spec.min,
                max = max,
                step = spec.step,
            );
            if let Some(message) = rejected.and_then(|r| r.message_for(spec.name)) {
                let _ = write!(html, "<span class=\"hint\">{}</span>", escape_html(&message));
            }
            html.push_str("</label>\n");
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");
}

fn render_outcome(html: &mut String, outcome: &Outcome<'_>) {
    let (class, message) = match outcome {
        Outcome::Verdict(verdict @ Verdict::Good) => ("success", verdict.message()),
        Outcome::Verdict(verdict @ Verdict::Bad) => ("error", verdict.message()),
        Outcome::Rejected(_) => ("error", "Please correct the highlighted fields."),
        Outcome::Failed => ("error", FAILURE_MESSAGE),
    };
    let _ = writeln!(html, "<div class=\"result {}\">{}</div>", class, message);
}

/// 整頁 HTML；`values` 為使用者上次送出的原始字串
pub fn render_page(values: &HashMap<String, String>, outcome: Option<&Outcome<'_>>) -> String {
    let rejected = match outcome {
        Some(Outcome::Rejected(r)) => Some(*r),
        _ => None,
    };

    let mut html = String::with_capacity(4096);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n<h1>{title}</h1>\n<h3>{subtitle}</h3>\n<hr>\n<form method=\"post\" action=\"/\">\n",
        title = PAGE_TITLE,
        style = STYLE,
        subtitle = SUBTITLE,
    );

    render_fields(&mut html, values, rejected);

    let _ = writeln!(html, "<button type=\"submit\">{}</button>\n</form>", SUBMIT_LABEL);

    if let Some(outcome) = outcome {
        render_outcome(&mut html, outcome);
    }

    html.push_str("<hr>\n<footer><p>Developed with ❤️ by [Uwais]</p></footer>\n</body>\n</html>\n");
    html
}
