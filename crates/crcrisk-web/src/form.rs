//! Parsing of the urlencoded input form into an `ExpressionInput`.
//!
//! Field names: `reference` for the reference gene and `gene_<ID>` for each
//! target gene. A blank field is treated as absent, so a blank target ends up
//! as a `MissingGeneValue` from the scorer rather than a silent zero.

use std::collections::HashMap;

use thiserror::Error;

use crcrisk_scorer::{ExpressionInput, GeneSignature};

pub const REFERENCE_FIELD: &str = "reference";
pub const GENE_FIELD_PREFIX: &str = "gene_";

pub fn gene_field(gene: &str) -> String {
    format!("{GENE_FIELD_PREFIX}{gene}")
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("No expression value supplied for reference gene {gene}")]
    MissingReference { gene: String },

    #[error("Value for {field} is not a number: {text:?}")]
    InvalidNumber { field: String, text: String },
}

impl FormError {
    pub fn kind(&self) -> &'static str {
        match self {
            FormError::MissingReference { .. } => "missing_reference",
            FormError::InvalidNumber { .. } => "invalid_number",
        }
    }
}

/// `None` for blank text, otherwise the parsed number.
/// "NaN" and "inf" parse successfully and are left for the scorer to reject.
fn parse_number(field: &str, text: Option<&String>) -> Result<Option<f64>, FormError> {
    let Some(text) = text.map(|t| t.trim()).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    text.parse::<f64>()
        .map(Some)
        .map_err(|_| FormError::InvalidNumber {
            field: field.to_string(),
            text: text.to_string(),
        })
}

/// Build scorer input from raw form fields. Only signature genes are read.
pub fn parse_expression_form(
    signature: &GeneSignature,
    fields: &HashMap<String, String>,
) -> Result<ExpressionInput, FormError> {
    let reference_value = parse_number(signature.reference_gene(), fields.get(REFERENCE_FIELD))?
        .ok_or_else(|| FormError::MissingReference {
            gene: signature.reference_gene().to_string(),
        })?;

    let mut input = ExpressionInput::new(reference_value);
    for gene in signature.genes() {
        if let Some(value) = parse_number(gene, fields.get(&gene_field(gene)))? {
            input.target_values.insert(gene.to_string(), value);
        }
    }
    Ok(input)
}
