//! Input form and rendered risk report.

use std::collections::HashMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use minijinja::context;
use tracing::{info, warn};

use crcrisk_scorer::score;

use crate::error::ApiError;
use crate::form::parse_expression_form;
use crate::report::{input_fields, ReportView};
use crate::state::{AppState, SharedState};

/// GET /: empty form pre-filled with the configured defaults
pub async fn form_page(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    render_page(&state, None, None, None).map(Html)
}

/// POST /predict: score the submitted form and render the report.
/// Invalid input re-renders the form with a message and no risk category.
pub async fn predict_submit(
    State(state): State<SharedState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let outcome = parse_expression_form(&state.signature, &fields)
        .map_err(ApiError::from)
        .and_then(|input| score(&state.signature, &input).map_err(ApiError::from));

    match outcome {
        Ok(result) => {
            info!(category = result.label(), "Risk report rendered");
            let report = ReportView::from_result(&result);
            match render_page(&state, Some(&fields), Some(report), None) {
                Ok(html) => Html(html).into_response(),
                Err(e) => e.into_response(),
            }
        }
        Err(e) => {
            warn!(kind = e.kind(), "Rejected form submission: {e}");
            let message = e.to_string();
            match render_page(&state, Some(&fields), None, Some(message)) {
                Ok(html) => (StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response(),
                Err(render_err) => render_err.into_response(),
            }
        }
    }
}

fn render_page(
    state: &AppState,
    submitted: Option<&HashMap<String, String>>,
    report: Option<ReportView>,
    error: Option<String>,
) -> Result<String, ApiError> {
    let sig = &state.signature;
    let template = state.templates.get_template("index.html")?;
    let html = template.render(context! {
        signature_name => sig.name(),
        reference_gene => sig.reference_gene(),
        cutoff => sig.cutoff(),
        coefficients => sig.coefficients(),
        fields => input_fields(sig, &state.form, submitted),
        form => &state.form,
        report => report,
        error => error,
    })?;
    Ok(html)
}
