//! JSON scoring API.

use axum::{extract::State, Json};
use serde::Serialize;

use crcrisk_scorer::{score, ExpressionInput, GeneSignature, RiskCategory, ScoreResult};

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub risk_label: &'static str,
    pub category: RiskCategory,
    pub reference_gene: String,
}

/// POST /api/score: score one expression profile
pub async fn api_score(
    State(state): State<SharedState>,
    Json(input): Json<ExpressionInput>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let result = score(&state.signature, &input)?;
    Ok(Json(ScoreResponse {
        risk_label: result.label(),
        category: result.category(),
        reference_gene: state.signature.reference_gene().to_string(),
        result,
    }))
}

/// GET /api/signature: the active coefficient table, reference gene and cutoff
pub async fn api_signature(State(state): State<SharedState>) -> Json<GeneSignature> {
    Json(state.signature.clone())
}
