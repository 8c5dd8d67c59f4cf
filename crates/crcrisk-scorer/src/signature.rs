//! Validated gene signature: ordered coefficient table, reference gene and cutoff.
//!
//! A `GeneSignature` is built once at startup and shared read-only
//! (typically behind an `Arc`) by every scoring call.

use std::collections::HashSet;

use crcrisk_common::{GeneWeight, SignatureConfig};
use serde::Serialize;

use crate::error::SignatureError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneSignature {
    name: String,
    reference_gene: String,
    cutoff: f64,
    /// Target genes in scoring order. Never empty, ids distinct.
    coefficients: Vec<GeneWeight>,
}

impl GeneSignature {
    /// Build a signature, enforcing the table invariants.
    pub fn new(
        name: impl Into<String>,
        reference_gene: impl Into<String>,
        cutoff: f64,
        coefficients: Vec<GeneWeight>,
    ) -> Result<Self, SignatureError> {
        let reference_gene = reference_gene.into();

        if coefficients.is_empty() {
            return Err(SignatureError::Empty);
        }
        if !cutoff.is_finite() {
            return Err(SignatureError::NonFiniteCutoff { value: cutoff });
        }

        check_table(&reference_gene, &coefficients)?;

        Ok(Self {
            name: name.into(),
            reference_gene,
            cutoff,
            coefficients,
        })
    }

    pub fn from_config(config: &SignatureConfig) -> Result<Self, SignatureError> {
        Self::new(
            config.name.clone(),
            config.reference_gene.clone(),
            config.cutoff,
            config.genes.clone(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference_gene(&self) -> &str {
        &self.reference_gene
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn coefficients(&self) -> &[GeneWeight] {
        &self.coefficients
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Always false for a constructed signature; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn genes(&self) -> impl Iterator<Item = &str> {
        self.coefficients.iter().map(|w| w.gene.as_str())
    }

    pub fn coefficient(&self, gene: &str) -> Option<f64> {
        self.coefficients
            .iter()
            .find(|w| w.gene == gene)
            .map(|w| w.coefficient)
    }
}

/// Gene ids non-blank, distinct, distinct from the reference; weights finite.
fn check_table(reference_gene: &str, coefficients: &[GeneWeight]) -> Result<(), SignatureError> {
    let mut seen = HashSet::with_capacity(coefficients.len());
    for entry in coefficients {
        if entry.gene.trim().is_empty() {
            return Err(SignatureError::BlankGene);
        }
        if !seen.insert(entry.gene.as_str()) {
            return Err(SignatureError::DuplicateGene { gene: entry.gene.clone() });
        }
        if entry.gene == reference_gene {
            return Err(SignatureError::ReferenceIsTarget { gene: entry.gene.clone() });
        }
        if !entry.coefficient.is_finite() {
            return Err(SignatureError::NonFiniteCoefficient {
                gene: entry.gene.clone(),
                value: entry.coefficient,
            });
        }
    }
    Ok(())
}

impl Default for GeneSignature {
    /// The published EMC7-normalised six-gene signature.
    fn default() -> Self {
        let config = SignatureConfig::default();
        Self {
            name: config.name,
            reference_gene: config.reference_gene,
            cutoff: config.cutoff,
            coefficients: config.genes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn weights(pairs: &[(&str, f64)]) -> Vec<GeneWeight> {
        pairs.iter().map(|(g, c)| GeneWeight::new(*g, *c)).collect()
    }

    #[test]
    fn test_default_passes_validation() {
        let validated = GeneSignature::from_config(&SignatureConfig::default()).unwrap();
        assert_eq!(validated, GeneSignature::default());
        assert_eq!(validated.len(), 6);
        assert_eq!(validated.reference_gene(), "EMC7");
        assert_eq!(validated.coefficient("PRIM1"), Some(-0.2529674));
        assert_eq!(validated.coefficient("EMC7"), None);
    }

    #[test]
    fn test_genes_keep_table_order() {
        let sig = GeneSignature::default();
        let genes: Vec<&str> = sig.genes().collect();
        assert_eq!(genes, vec!["TCEAL4", "ACTR3B", "ORAI3", "PRIM1", "LEMD1", "INHBB"]);
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = GeneSignature::new("s", "REF", 0.5, vec![]).unwrap_err();
        assert_eq!(err, SignatureError::Empty);
    }

    #[test]
    fn test_duplicate_gene_rejected() {
        let err = GeneSignature::new("s", "REF", 0.5, weights(&[("A", 1.0), ("A", 2.0)]))
            .unwrap_err();
        assert_eq!(err, SignatureError::DuplicateGene { gene: "A".into() });
    }

    #[test]
    fn test_blank_gene_rejected() {
        let err = GeneSignature::new("s", "REF", 0.5, weights(&[("  ", 1.0)])).unwrap_err();
        assert_eq!(err, SignatureError::BlankGene);
    }

    #[test]
    fn test_reference_listed_as_target_rejected() {
        let err = GeneSignature::new("s", "REF", 0.5, weights(&[("REF", 1.0)])).unwrap_err();
        assert_eq!(err, SignatureError::ReferenceIsTarget { gene: "REF".into() });
    }

    #[test]
    fn test_non_finite_cutoff_rejected() {
        let err = GeneSignature::new("s", "REF", f64::NAN, weights(&[("A", 1.0)])).unwrap_err();
        assert!(matches!(err, SignatureError::NonFiniteCutoff { .. }));
    }

    #[test]
    fn test_non_finite_coefficient_rejected() {
        let err = GeneSignature::new("s", "REF", 0.5, weights(&[("A", f64::INFINITY)]))
            .unwrap_err();
        assert!(matches!(err, SignatureError::NonFiniteCoefficient { ref gene, .. } if gene == "A"));
    }

    #[test]
    fn test_serializes_for_api() {
        let json = serde_json::to_value(GeneSignature::default()).unwrap();
        assert_eq!(json["reference_gene"], "EMC7");
        assert_eq!(json["coefficients"][0]["gene"], "TCEAL4");
    }
}
