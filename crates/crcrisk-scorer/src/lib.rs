//! crcrisk-scorer: Gene-signature risk scoring engine.
//!
//! Maps log2 expression values for a reference gene and the signature's
//! target genes to a linear risk score and a High/Low risk category:
//!
//! ```text
//! score = Σ (expr_g − expr_ref) × coef_g      high risk ⇔ score > cutoff
//! ```

pub mod error;
pub mod normalise;
pub mod scorer;
pub mod signature;

pub use error::{ScoreError, SignatureError};
pub use scorer::{score, ExpressionInput, GeneContribution, RiskCategory, ScoreResult};
pub use signature::GeneSignature;
