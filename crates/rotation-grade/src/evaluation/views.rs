use super::aggregate::Evaluation;
use super::domain::{format_optional, Grade, Score};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ItemSummary {
    pub label: &'static str,
    pub score: Score,
    pub score_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    pub title: String,
    pub nominal_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_weight: Option<f64>,
    pub average: Option<Grade>,
    pub average_label: String,
    pub items: Vec<ItemSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummary {
    pub sections: Vec<SectionSummary>,
    pub active_weight: f64,
    pub final_score: Option<Grade>,
    pub final_score_label: String,
    pub passed: Option<bool>,
    pub passed_label: &'static str,
    pub pass_threshold: Grade,
}

impl Evaluation {
    pub fn summary(&self) -> EvaluationSummary {
        let final_result = &self.final_result;

        let sections = self
            .sections
            .iter()
            .map(|section| SectionSummary {
                title: section.section.title(),
                nominal_weight: section.section.weight(),
                effective_weight: final_result
                    .effective_weight(section)
                    .map(|weight| f64::from(weight) / 10_000.0),
                average: section.average,
                average_label: format_optional(section.average),
                items: section
                    .items
                    .iter()
                    .map(|item| ItemSummary {
                        label: item.label,
                        score: item.score,
                        score_label: item.score.to_string(),
                    })
                    .collect(),
            })
            .collect();

        EvaluationSummary {
            sections,
            active_weight: f64::from(final_result.active_weight_percent) / 100.0,
            final_score: final_result.final_score,
            final_score_label: format_optional(final_result.final_score),
            passed: final_result.passed,
            passed_label: final_result.pass_label(),
            pass_threshold: self.instrument.pass_threshold,
        }
    }
}
