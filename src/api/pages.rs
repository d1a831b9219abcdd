use std::collections::HashMap;
use std::fmt::Write;

use crate::core::FormErrors;
use crate::ml::{PerformanceBand, PredictionResult, PARAMETER_CATALOG};

/// What the dashboard shows under the form
#[derive(Debug, Clone, Copy)]
pub enum DashboardOutcome<'a> {
    Empty,
    Prediction(&'a PredictionResult),
    Errors(&'a FormErrors),
}

pub fn prediction_message(result: &PredictionResult) -> String {
    format!(
        "Predicted Equipment Output: {:.2} units/hour",
        result.predicted_output
    )
}

pub fn band_message(band: PerformanceBand) -> &'static str {
    match band {
        PerformanceBand::Low => "Low output expected. Review process settings.",
        PerformanceBand::Moderate => {
            "Moderate output expected. Performance is within the normal range."
        }
        PerformanceBand::High => "High output expected. The machine is running efficiently.",
    }
}

/// Dashboard page. `values` holds the raw submitted strings so a rejected
/// form comes back exactly as typed.
pub fn render_dashboard(values: &HashMap<String, String>, outcome: DashboardOutcome<'_>) -> String {
    let mut body = String::new();
    body.push_str("<h1>Equipment Output Predictor</h1>\n");
    body.push_str("<form method=\"post\" action=\"/predict\">\n");

    for spec in PARAMETER_CATALOG.iter() {
        let value = values
            .get(spec.name)
            .map(|v| escape_html(v))
            .unwrap_or_else(|| spec.default.to_string());

        let _ = writeln!(
            body,
            "  <label for=\"{name}\">{label} ({unit})</label>\n  \
             <input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"any\" value=\"{value}\">",
            name = spec.name,
            label = spec.label,
            unit = spec.unit,
            min = spec.min,
            max = spec.max,
            value = value,
        );
    }

    body.push_str("  <button type=\"submit\">Predict</button>\n</form>\n");

    match outcome {
        DashboardOutcome::Empty => {}
        DashboardOutcome::Prediction(result) => {
            let _ = writeln!(
                body,
                "<div class=\"result band-{band}\">\n  <p>{output}</p>\n  <p>Performance: {band} - {note}</p>\n</div>",
                band = result.band,
                output = prediction_message(result),
                note = band_message(result.band),
            );
        }
        DashboardOutcome::Errors(errors) => body.push_str(&error_list(errors)),
    }

    page("Equipment Output Predictor", &body)
}

/// Contact page, optionally with the confirmation or the field errors
pub fn render_contact(greeting: Option<&str>, errors: Option<&FormErrors>) -> String {
    let mut body = String::from(
        "<h1>Contact Us</h1>\n\
         <form method=\"post\" action=\"/submit\">\n  \
         <label for=\"name\">Name</label>\n  <input type=\"text\" id=\"name\" name=\"name\" required>\n  \
         <label for=\"email\">Email</label>\n  <input type=\"email\" id=\"email\" name=\"email\" required>\n  \
         <label for=\"message\">Message</label>\n  <textarea id=\"message\" name=\"message\" required></textarea>\n  \
         <button type=\"submit\">Send</button>\n</form>\n",
    );

    if let Some(greeting) = greeting {
        let _ = writeln!(body, "<p class=\"result\">{}</p>", escape_html(greeting));
    }
    if let Some(errors) = errors {
        body.push_str(&error_list(errors));
    }

    page("Contact", &body)
}

fn error_list(errors: &FormErrors) -> String {
    let mut out = String::from("<ul class=\"errors\">\n");
    for message in errors.messages() {
        let _ = writeln!(out, "  <li>{}</li>", escape_html(&message));
    }
    out.push_str("</ul>\n");
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        title, body
    )
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
