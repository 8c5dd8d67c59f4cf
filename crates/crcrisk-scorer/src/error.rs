//! Scoring and signature validation errors.

use thiserror::Error;

/// Scoring failures. Input problems are detected before any arithmetic runs;
/// `NonFiniteScore` covers finite inputs whose arithmetic overflows.
/// Scoring is all-or-nothing: an error means no `ScoreResult` exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("No expression value supplied for gene {gene}")]
    MissingGeneValue { gene: String },

    #[error("Expression value for {field} is not a finite number (got {value})")]
    NonFiniteInput { field: String, value: f64 },

    /// `term` is the gene whose contribution overflowed, or `risk_score` for the sum.
    #[error("Score term {term} is not a finite number (got {value}); expression values are out of range")]
    NonFiniteScore { term: String, value: f64 },
}

impl ScoreError {
    /// Stable machine-readable tag, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ScoreError::MissingGeneValue { .. } => "missing_gene_value",
            ScoreError::NonFiniteInput { .. } => "non_finite_input",
            ScoreError::NonFiniteScore { .. } => "non_finite_score",
        }
    }
}

/// A signature table that violates the coefficient invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignatureError {
    #[error("Signature has no target genes")]
    Empty,

    #[error("Signature contains a blank gene identifier")]
    BlankGene,

    #[error("Gene {gene} appears more than once in the signature")]
    DuplicateGene { gene: String },

    #[error("Reference gene {gene} is also listed as a target gene")]
    ReferenceIsTarget { gene: String },

    #[error("Cutoff must be a finite number (got {value})")]
    NonFiniteCutoff { value: f64 },

    #[error("Coefficient for {gene} must be a finite number (got {value})")]
    NonFiniteCoefficient { gene: String, value: f64 },
}
