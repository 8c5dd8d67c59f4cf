//! Risk score computation.
//!
//! score = Σ_g (expr_g − expr_ref) × coef_g
//! high risk ⇔ score > cutoff (a score equal to the cutoff is low risk)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScoreError;
use crate::normalise::delta_log2;
use crate::signature::GeneSignature;

/// Expression values for one sample, as submitted by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpressionInput {
    /// Log2 expression of the reference gene
    pub reference_value: f64,
    /// Log2 expression keyed by target gene id
    #[serde(default)]
    pub target_values: HashMap<String, f64>,
}

impl ExpressionInput {
    pub fn new(reference_value: f64) -> Self {
        Self {
            reference_value,
            target_values: HashMap::new(),
        }
    }

    /// Builder-style setter for one target gene.
    pub fn with(mut self, gene: impl Into<String>, value: f64) -> Self {
        self.target_values.insert(gene.into(), value);
        self
    }

    /// Every signature gene set to the same value.
    pub fn uniform(signature: &GeneSignature, reference_value: f64, value: f64) -> Self {
        signature
            .genes()
            .fold(Self::new(reference_value), |input, gene| input.with(gene, value))
    }
}

/// One row of the auditable per-gene breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneContribution {
    pub gene: String,
    pub raw: f64,
    /// raw − reference
    pub normalized: f64,
    pub coefficient: f64,
    /// normalized × coefficient
    pub contribution: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    High,
}

impl RiskCategory {
    pub fn from_high_risk(is_high_risk: bool) -> Self {
        if is_high_risk { RiskCategory::High } else { RiskCategory::Low }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::High => "High Risk",
            RiskCategory::Low => "Low Risk",
        }
    }
}

/// Output of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub risk_score: f64,
    /// One entry per signature gene, in signature order
    pub per_gene_detail: Vec<GeneContribution>,
    pub is_high_risk: bool,
    /// Cutoff the score was compared against
    pub cutoff: f64,
}

impl ScoreResult {
    pub fn category(&self) -> RiskCategory {
        RiskCategory::from_high_risk(self.is_high_risk)
    }

    pub fn label(&self) -> &'static str {
        self.category().label()
    }

    /// Detail rows ordered by contribution, largest first. Used for charting.
    pub fn sorted_by_contribution(&self) -> Vec<&GeneContribution> {
        let mut rows: Vec<&GeneContribution> = self.per_gene_detail.iter().collect();
        rows.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
        rows
    }

    /// Sum of the detail contributions; equals `risk_score` up to rounding.
    pub fn contribution_total(&self) -> f64 {
        self.per_gene_detail.iter().map(|d| d.contribution).sum()
    }
}

/// Check the scoring preconditions: finite reference, and a finite value for
/// every signature gene. Errors are reported in signature order, reference first.
fn validate(signature: &GeneSignature, input: &ExpressionInput) -> Result<(), ScoreError> {
    if !input.reference_value.is_finite() {
        return Err(ScoreError::NonFiniteInput {
            field: signature.reference_gene().to_string(),
            value: input.reference_value,
        });
    }

    for gene in signature.genes() {
        match input.target_values.get(gene) {
            None => {
                return Err(ScoreError::MissingGeneValue { gene: gene.to_string() });
            }
            Some(v) if !v.is_finite() => {
                return Err(ScoreError::NonFiniteInput {
                    field: gene.to_string(),
                    value: *v,
                });
            }
            Some(_) => {}
        }
    }

    let extra = input
        .target_values
        .keys()
        .filter(|g| signature.coefficient(g).is_none())
        .count();
    if extra > 0 {
        debug!(extra, "ignoring expression values for genes outside the signature");
    }

    Ok(())
}

/// Score one sample against the signature.
///
/// Pure and deterministic: the same signature and input always produce a
/// bit-identical result. Fails without a partial result when a signature gene
/// has no value, any used value is not finite, or the arithmetic overflows.
pub fn score(signature: &GeneSignature, input: &ExpressionInput) -> Result<ScoreResult, ScoreError> {
    validate(signature, input)?;

    let per_gene_detail: Vec<GeneContribution> = signature
        .coefficients()
        .iter()
        .map(|w| {
            // presence checked in validate()
            let raw = input.target_values.get(&w.gene).copied().unwrap_or_default();
            let normalized = delta_log2(raw, input.reference_value);
            GeneContribution {
                gene: w.gene.clone(),
                raw,
                normalized,
                coefficient: w.coefficient,
                contribution: normalized * w.coefficient,
            }
        })
        .collect();

    if let Some(d) = per_gene_detail.iter().find(|d| !d.contribution.is_finite()) {
        return Err(ScoreError::NonFiniteScore {
            term: d.gene.clone(),
            value: d.contribution,
        });
    }

    let risk_score: f64 = per_gene_detail.iter().map(|d| d.contribution).sum();
    if !risk_score.is_finite() {
        return Err(ScoreError::NonFiniteScore {
            term: "risk_score".to_string(),
            value: risk_score,
        });
    }

    let is_high_risk = risk_score > signature.cutoff();

    debug!(
        risk_score,
        cutoff = signature.cutoff(),
        category = RiskCategory::from_high_risk(is_high_risk).label(),
        "scored expression input"
    );

    Ok(ScoreResult {
        risk_score,
        per_gene_detail,
        is_high_risk,
        cutoff: signature.cutoff(),
    })
}
