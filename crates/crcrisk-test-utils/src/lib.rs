//! Fixtures shared by crcrisk integration tests.

use crcrisk_common::AppConfig;
use crcrisk_scorer::{ExpressionInput, GeneSignature};
use serde_json::{json, Value};

/// Reference value of the worked example (EMC7 = 6.90).
pub const SCENARIO_REFERENCE: f64 = 6.90;
/// Target value used for every gene in the worked example.
pub const SCENARIO_TARGET: f64 = 10.00;
/// Score of the worked example: 3.1 × Σ coefficients.
pub const SCENARIO_SCORE: f64 = 0.89225781;

/// The published signature.
pub fn signature() -> GeneSignature {
    GeneSignature::default()
}

/// Config with default signature and form settings.
pub fn app_config() -> AppConfig {
    AppConfig::default()
}

/// Reference 6.90, every target 10.00; high risk under the published signature.
pub fn scenario_input() -> ExpressionInput {
    ExpressionInput::uniform(&signature(), SCENARIO_REFERENCE, SCENARIO_TARGET)
}

/// All targets equal to the reference; scores exactly zero.
pub fn neutral_input() -> ExpressionInput {
    ExpressionInput::uniform(&signature(), 9.5, 9.5)
}

/// JSON body for `POST /api/score`.
pub fn score_request(input: &ExpressionInput) -> Value {
    json!({
        "reference_value": input.reference_value,
        "target_values": input.target_values,
    })
}

/// urlencoded body for `POST /predict` using the form's field names.
pub fn form_body(reference: &str, targets: &[(&str, &str)]) -> String {
    let mut parts = vec![format!("reference={reference}")];
    parts.extend(targets.iter().map(|(g, v)| format!("gene_{g}={v}")));
    parts.join("&")
}

/// Form body for the worked example.
pub fn scenario_form_body() -> String {
    let sig = signature();
    let targets: Vec<(&str, &str)> = sig.genes().map(|g| (g, "10.00")).collect();
    form_body("6.90", &targets)
}
