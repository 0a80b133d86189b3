//! Hand-built HTML pages. Every interpolated value goes through [`escape`].

use crate::flash::Flash;
use hrp_features::{schema_for, Domain, FeatureVector, FieldKind, FieldSpec};
use hrp_model::PredictionResult;
use std::fmt::Write;

pub const APP_NAME: &str = "Health Risk Predictor";

const STYLE: &str = "body{font-family:sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem}\
nav a{margin-right:1rem}.flash{padding:.5rem 1rem;margin:.5rem 0;border-radius:4px}\
.info{background:#e7f1fb}.success{background:#e6f6e6}.error{background:#fbe7e7}\
label{display:block;margin-top:.6rem}table{border-collapse:collapse}td{padding:.2rem .8rem}";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, flashes: &[Flash], body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{} | {APP_NAME}</title><style>{STYLE}</style></head><body>\
         <nav><a href=\"/\">Home</a><a href=\"/heart_disease\">Heart Disease</a>\
         <a href=\"/diabetes\">Diabetes</a><a href=\"/about\">About</a></nav>",
        escape(title)
    );
    for flash in flashes {
        let _ = write!(
            html,
            "<div class=\"flash {}\">{}</div>",
            flash.category.as_str(),
            escape(&flash.message)
        );
    }
    html.push_str(body);
    html.push_str("</body></html>");
    html
}

pub fn index(flashes: &[Flash]) -> String {
    let mut body = format!("<h1>{APP_NAME}</h1>");
    body.push_str(
        "<p>Estimate the risk of heart disease or diabetes from routine clinical \
         measurements.</p><ul>",
    );
    for domain in Domain::ALL {
        let _ = write!(
            body,
            "<li><a href=\"{}\">{} risk assessment</a></li>",
            domain.form_path(),
            domain.display_name()
        );
    }
    body.push_str(
        "</ul><p><a href=\"/train_models\">Train models</a> \
         (required once before the first prediction)</p>",
    );
    layout(APP_NAME, flashes, &body)
}

fn input_for(spec: &FieldSpec) -> String {
    let name = escape(spec.name);
    match spec.kind {
        FieldKind::Integer => {
            format!("<input type=\"number\" step=\"1\" id=\"{name}\" name=\"{name}\" required>")
        }
        FieldKind::Float => {
            format!("<input type=\"number\" step=\"any\" id=\"{name}\" name=\"{name}\" required>")
        }
        FieldKind::Categorical(vocab) => {
            let mut select = format!("<select id=\"{name}\" name=\"{name}\" required>");
            for option in vocab {
                let option = escape(option);
                let _ = write!(select, "<option value=\"{option}\">{option}</option>");
            }
            select.push_str("</select>");
            select
        }
    }
}

pub fn form(domain: Domain, flashes: &[Flash]) -> String {
    let title = format!("{} Risk Assessment", domain.display_name());
    let mut body = format!(
        "<h1>{}</h1><form method=\"post\" action=\"{}\">",
        escape(&title),
        domain.predict_path()
    );
    for spec in schema_for(domain).fields {
        let _ = write!(
            body,
            "<label for=\"{}\">{}</label>{}",
            escape(spec.name),
            escape(spec.label),
            input_for(spec)
        );
    }
    body.push_str("<p><button type=\"submit\">Predict</button></p></form>");
    layout(&title, flashes, &body)
}

pub fn result(features: &FeatureVector, result: &PredictionResult, flashes: &[Flash]) -> String {
    let domain = features.domain();
    let schema = schema_for(domain);
    let title = format!("{} Prediction", domain.display_name());

    let mut body = format!("<h1>{}</h1>", escape(&title));
    let _ = write!(
        body,
        "<p>Prediction: <strong class=\"label\">{}</strong></p>\
         <p>Confidence: <span class=\"confidence\">{:.3}</span> ({})</p>\
         <p>Risk level: {} (risk probability {:.3})</p>",
        escape(result.label.as_str()),
        result.confidence,
        escape(&result.confidence_percent()),
        escape(result.stratum.as_str()),
        result.probability
    );
    body.push_str("<h2>Submitted values</h2><table>");
    for (name, value) in features.entries() {
        let label = schema.field(name).map(|f| f.label).unwrap_or(name);
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape(label),
            escape(&value.to_string())
        );
    }
    let _ = write!(
        body,
        "</table><p><a href=\"{}\">New assessment</a></p>\
         <p><small>This estimate is not a diagnosis. Consult a clinician.</small></p>",
        domain.form_path()
    );
    layout(&title, flashes, &body)
}

pub fn about(flashes: &[Flash]) -> String {
    let body = format!(
        "<h1>About</h1><p>{APP_NAME} scores clinical measurements with logistic \
         regression models trained on public heart disease and diabetes datasets, \
         or on a generated cohort when no dataset is installed.</p>\
         <p>Results are statistical estimates for education only and must not be \
         used for medical decisions.</p><p>Version {}</p>",
        env!("CARGO_PKG_VERSION")
    );
    layout("About", flashes, &body)
}

pub fn not_found(path: &str) -> String {
    let body = format!(
        "<h1>Page not found</h1><p>Nothing lives at <code>{}</code>.</p>\
         <p><a href=\"/\">Back to the start page</a></p>",
        escape(path)
    );
    layout("Not found", &[], &body)
}
