//! View models for the HTML report: formatted score, recommendation text,
//! contribution chart bars and the per-gene detail table.
//!
//! Everything here is a pure function of a `ScoreResult`; the templates only
//! lay the values out.

use serde::Serialize;

use crcrisk_common::FormConfig;
use crcrisk_scorer::{GeneSignature, RiskCategory, ScoreResult};

use crate::form::{gene_field, REFERENCE_FIELD};

/// Static bilingual advice selected purely by risk category.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub summary_en: &'static str,
    pub summary_zh: &'static str,
    pub actions: Vec<(&'static str, &'static str)>,
}

impl Recommendation {
    pub fn for_category(category: RiskCategory) -> Self {
        match category {
            RiskCategory::High => Self {
                summary_en: "This patient falls in the high-risk group. In the retrospective \
                             cohort, post-operative recurrence risk in this group was markedly \
                             above average.",
                summary_zh: "该患者属于高风险组。根据回顾性队列研究结果，其术后复发风险显著高于平均水平。",
                actions: vec![
                    ("Consider a more intensive adjuvant chemotherapy regimen.",
                     "考虑更积极的辅助化疗方案。"),
                    ("Shorten the post-operative follow-up interval (e.g. every 3 months).",
                     "缩短术后随访间隔（如每3个月一次）。"),
                ],
            },
            RiskCategory::Low => Self {
                summary_en: "This patient falls in the low-risk group. In the retrospective \
                             cohort, prognosis in this group was comparatively favourable.",
                summary_zh: "该患者属于低风险组。根据回顾性队列研究结果，其预后相对较好。",
                actions: vec![
                    ("Maintain the standard follow-up schedule.",
                     "可维持标准随访计划。"),
                    ("Avoid over-treatment and focus on quality of life.",
                     "避免过度治疗，关注生活质量。"),
                ],
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailRow {
    pub gene: String,
    pub raw: String,
    pub normalized: String,
    pub coefficient: String,
    pub contribution: String,
}

/// One horizontal bar of the contribution chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartBar {
    pub gene: String,
    pub contribution: String,
    /// Bar length as a percentage of the largest absolute contribution
    pub width_pct: f64,
    pub positive: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub score: String,
    pub cutoff: String,
    pub label: &'static str,
    /// "high" or "low"; drives colour classes in the template
    pub category: &'static str,
    pub recommendation: Recommendation,
    pub chart: Vec<ChartBar>,
    pub rows: Vec<DetailRow>,
}

impl ReportView {
    pub fn from_result(result: &ScoreResult) -> Self {
        let category = result.category();
        Self {
            score: format!("{:.4}", result.risk_score),
            cutoff: format!("{}", result.cutoff),
            label: category.label(),
            category: match category {
                RiskCategory::High => "high",
                RiskCategory::Low => "low",
            },
            recommendation: Recommendation::for_category(category),
            chart: chart_bars(result),
            rows: result
                .per_gene_detail
                .iter()
                .map(|d| DetailRow {
                    gene: d.gene.clone(),
                    raw: format!("{:.2}", d.raw),
                    normalized: format!("{:.4}", d.normalized),
                    coefficient: format!("{:.7}", d.coefficient),
                    contribution: format!("{:.4}", d.contribution),
                })
                .collect(),
        }
    }
}

/// Bars sorted by contribution, largest first, scaled to the largest magnitude.
pub fn chart_bars(result: &ScoreResult) -> Vec<ChartBar> {
    let max_abs = result
        .per_gene_detail
        .iter()
        .map(|d| d.contribution.abs())
        .fold(0.0_f64, f64::max);

    result
        .sorted_by_contribution()
        .into_iter()
        .map(|d| ChartBar {
            gene: d.gene.clone(),
            contribution: format!("{:+.4}", d.contribution),
            width_pct: if max_abs > 0.0 {
                (d.contribution.abs() / max_abs * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            },
            positive: d.contribution >= 0.0,
        })
        .collect()
}

/// One numeric input widget of the form.
#[derive(Debug, Clone, Serialize)]
pub struct InputField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub coefficient: Option<f64>,
}

/// Input widgets in signature order, the reference gene first.
/// `submitted` holds the raw form text to redisplay after a failed submission.
pub fn input_fields(
    signature: &GeneSignature,
    form: &FormConfig,
    submitted: Option<&std::collections::HashMap<String, String>>,
) -> Vec<InputField> {
    let value_for = |name: &str| -> String {
        match submitted {
            Some(fields) => fields.get(name).cloned().unwrap_or_default(),
            None => format!("{:.1}", form.default_value),
        }
    };

    let mut fields = vec![InputField {
        name: REFERENCE_FIELD.to_string(),
        label: signature.reference_gene().to_string(),
        value: value_for(REFERENCE_FIELD),
        coefficient: None,
    }];

    fields.extend(signature.coefficients().iter().map(|w| {
        let name = gene_field(&w.gene);
        InputField {
            value: value_for(&name),
            name,
            label: w.gene.clone(),
            coefficient: Some(w.coefficient),
        }
    }));

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crcrisk_scorer::{score, ExpressionInput};
    use std::collections::HashMap;

    fn scenario() -> ScoreResult {
        let sig = GeneSignature::default();
        score(&sig, &ExpressionInput::uniform(&sig, 6.90, 10.00)).unwrap()
    }

    #[test]
    fn test_score_formatted_to_four_decimals() {
        let view = ReportView::from_result(&scenario());
        assert_eq!(view.score, "0.8923");
        assert_eq!(view.cutoff, "0.5739");
        assert_eq!(view.label, "High Risk");
        assert_eq!(view.category, "high");
        assert_eq!(view.rows.len(), 6);
        assert_eq!(view.rows[0].contribution, "1.0430");
    }

    #[test]
    fn test_recommendation_follows_category() {
        let high = Recommendation::for_category(RiskCategory::High);
        let low = Recommendation::for_category(RiskCategory::Low);
        assert!(high.summary_en.contains("high-risk"));
        assert!(low.summary_zh.contains("低风险组"));
        assert_eq!(high.actions.len(), 2);
    }

    #[test]
    fn test_chart_largest_magnitude_is_full_width() {
        let bars = chart_bars(&scenario());
        assert_eq!(bars.first().map(|b| b.gene.as_str()), Some("TCEAL4"));
        let actr3b = bars.iter().find(|b| b.gene == "ACTR3B").unwrap();
        assert_eq!(actr3b.width_pct, 100.0);
        assert!(!actr3b.positive);
        assert!(bars.iter().all(|b| (0.0..=100.0).contains(&b.width_pct)));
    }

    #[test]
    fn test_chart_all_zero_contributions() {
        let sig = GeneSignature::default();
        let result = score(&sig, &ExpressionInput::uniform(&sig, 7.0, 7.0)).unwrap();
        assert!(chart_bars(&result).iter().all(|b| b.width_pct == 0.0));
    }

    #[test]
    fn test_input_fields_default_values() {
        let fields = input_fields(&GeneSignature::default(), &FormConfig::default(), None);
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[0].name, "reference");
        assert_eq!(fields[0].label, "EMC7");
        assert_eq!(fields[0].value, "10.0");
        assert_eq!(fields[1].name, "gene_TCEAL4");
        assert_eq!(fields[1].coefficient, Some(0.3364594));
    }

    #[test]
    fn test_input_fields_redisplay_submission() {
        let submitted: HashMap<String, String> =
            [("reference".to_string(), "abc".to_string())].into_iter().collect();
        let fields = input_fields(&GeneSignature::default(), &FormConfig::default(), Some(&submitted));
        assert_eq!(fields[0].value, "abc");
        assert_eq!(fields[1].value, "");
    }
}
