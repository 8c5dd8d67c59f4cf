//! Algebraic properties of the signature score.
//!
//! Run with: cargo test --package crcrisk-scorer --test properties

use crcrisk_common::GeneWeight;
use crcrisk_scorer::{score, ExpressionInput, GeneSignature, ScoreError};

/// A handful of realistic, uneven expression profiles.
fn profiles(sig: &GeneSignature) -> Vec<ExpressionInput> {
    let raw = [
        [11.2, 9.4, 7.9, 10.1, 6.3, 8.8],
        [5.0, 12.5, 9.9, 4.4, 13.0, 7.7],
        [8.0, 8.0, 8.0, 8.0, 8.0, 8.0],
        [0.1, 24.9, 3.3, 17.6, 2.2, 19.5],
    ];
    let refs = [6.9, 9.1, 12.0, 0.0];

    raw.iter()
        .zip(refs)
        .map(|(values, reference)| {
            sig.genes()
                .zip(values.iter())
                .fold(ExpressionInput::new(reference), |input, (g, v)| input.with(g, *v))
        })
        .collect()
}

#[test]
fn repeated_scoring_is_bit_identical() {
    let sig = GeneSignature::default();
    for input in profiles(&sig) {
        let first = score(&sig, &input).unwrap();
        for _ in 0..10 {
            let again = score(&sig, &input).unwrap();
            assert_eq!(first.risk_score.to_bits(), again.risk_score.to_bits());
            assert_eq!(first.is_high_risk, again.is_high_risk);
        }
    }
}

#[test]
fn score_equals_sum_of_contributions() {
    let sig = GeneSignature::default();
    for input in profiles(&sig) {
        let result = score(&sig, &input).unwrap();
        let total = result.contribution_total();
        let tolerance = 1e-9 * result.risk_score.abs().max(1.0);
        assert!((result.risk_score - total).abs() <= tolerance);
        assert_eq!(result.per_gene_detail.len(), sig.len());
    }
}

#[test]
fn scaling_normalised_values_scales_score() {
    let sig = GeneSignature::default();
    for input in profiles(&sig) {
        let base = score(&sig, &input).unwrap();
        for k in [-2.0, 0.5, 3.0, 10.0] {
            let scaled = sig.genes().fold(ExpressionInput::new(input.reference_value), |acc, g| {
                let delta = input.target_values[g] - input.reference_value;
                acc.with(g, input.reference_value + k * delta)
            });
            let result = score(&sig, &scaled).unwrap();
            let expected = k * base.risk_score;
            assert!(
                (result.risk_score - expected).abs() <= 1e-9 * expected.abs().max(1.0),
                "k={k}: {} vs {}",
                result.risk_score,
                expected
            );
        }
    }
}

#[test]
fn each_contribution_is_normalised_times_coefficient() {
    let sig = GeneSignature::default();
    for input in profiles(&sig) {
        let result = score(&sig, &input).unwrap();
        for row in &result.per_gene_detail {
            assert_eq!(row.normalized, row.raw - input.reference_value);
            assert_eq!(row.contribution, row.normalized * row.coefficient);
            assert_eq!(Some(row.coefficient), sig.coefficient(&row.gene));
        }
    }
}

#[test]
fn high_risk_iff_score_exceeds_cutoff() {
    let sig = GeneSignature::default();
    for input in profiles(&sig) {
        let result = score(&sig, &input).unwrap();
        assert_eq!(result.is_high_risk, result.risk_score > sig.cutoff());
    }
}

#[test]
fn missing_gene_produces_no_result() {
    let sig = GeneSignature::default();
    for gene in sig.genes() {
        let mut input = ExpressionInput::uniform(&sig, 6.9, 10.0);
        input.target_values.remove(gene);
        match score(&sig, &input) {
            Err(ScoreError::MissingGeneValue { gene: missing }) => assert_eq!(missing, gene),
            other => panic!("expected MissingGeneValue for {gene}, got {other:?}"),
        }
    }
}

#[test]
fn custom_signature_scores_with_its_own_cutoff() {
    let sig = GeneSignature::new(
        "two-gene",
        "ACTB",
        -1.0,
        vec![GeneWeight::new("X", 2.0), GeneWeight::new("Y", -1.0)],
    )
    .unwrap();
    // (3-5)*2 + (4-5)*-1 = -4 + 1 = -3  →  below -1.0
    let input = ExpressionInput::new(5.0).with("X", 3.0).with("Y", 4.0);
    let result = score(&sig, &input).unwrap();
    assert_eq!(result.risk_score, -3.0);
    assert!(!result.is_high_risk);
    assert_eq!(result.cutoff, -1.0);
}
