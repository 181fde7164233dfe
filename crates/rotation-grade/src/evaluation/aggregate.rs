//! Section averages and the reweighted final score.
//!
//! All arithmetic runs on integer hundredths. Rounding is half-up and is
//! evaluated on the exact rational value, so `(a + b) / 2` with a true tie
//! always rounds away from zero.

use super::domain::{Grade, Score};
use super::instrument::{Instrument, SectionTemplate};
use super::sheet::ScoreSheet;
use tracing::debug;

/// One scored item as it appears on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemResult {
    pub label: &'static str,
    pub score: Score,
}

/// Derived per-section outcome; `average` is `None` when every item is N/A.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionResult {
    pub section: &'static SectionTemplate,
    pub items: Vec<ItemResult>,
    pub average: Option<Grade>,
}

impl SectionResult {
    pub fn is_active(&self) -> bool {
        self.average.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalResult {
    pub active_weight_percent: u32,
    pub final_score: Option<Grade>,
    pub passed: Option<bool>,
}

impl FinalResult {
    pub fn pass_label(&self) -> &'static str {
        match self.passed {
            Some(true) => "Sí",
            Some(false) => "No",
            None => "N/A",
        }
    }

    /// Renormalized weight of a section in hundredths of a percent
    /// (5385 = 53.85%). `None` for inactive sections.
    pub fn effective_weight(&self, section: &SectionResult) -> Option<u32> {
        if !section.is_active() || self.active_weight_percent == 0 {
            return None;
        }
        let weight = u32::from(section.section.weight_percent) * 10_000;
        Some(round_half_up(weight, self.active_weight_percent))
    }
}

/// Complete aggregation of one score sheet, sections in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub instrument: &'static Instrument,
    pub sections: Vec<SectionResult>,
    pub final_result: FinalResult,
}

fn round_half_up(numerator: u32, denominator: u32) -> u32 {
    (2 * numerator + denominator) / (2 * denominator)
}

pub fn compute_section_average(items: &[Score]) -> Option<Grade> {
    let (sum, count) = items
        .iter()
        .filter_map(|score| score.grade())
        .fold((0u32, 0u32), |(sum, count), grade| {
            (sum + u32::from(grade.hundredths()), count + 1)
        });

    if count == 0 {
        return None;
    }

    let average = round_half_up(sum, count);
    Some(Grade::from_hundredths(average as u16))
}

/// Weights the active sections' averages after renormalizing their nominal
/// weights to 100%. An evaluation with no active section has no final score.
pub fn compute_final_score(sections: &[SectionResult], pass_threshold: Grade) -> FinalResult {
    let (weighted, active_weight) =
        sections
            .iter()
            .fold((0u32, 0u32), |(weighted, active), section| match section.average {
                Some(average) => {
                    let weight = u32::from(section.section.weight_percent);
                    (
                        weighted + u32::from(average.hundredths()) * weight,
                        active + weight,
                    )
                }
                None => (weighted, active),
            });

    if active_weight == 0 {
        return FinalResult {
            active_weight_percent: 0,
            final_score: None,
            passed: None,
        };
    }

    let final_score = Grade::from_hundredths(round_half_up(weighted, active_weight) as u16);
    FinalResult {
        active_weight_percent: active_weight,
        final_score: Some(final_score),
        passed: Some(final_score >= pass_threshold),
    }
}

pub fn aggregate(sheet: &ScoreSheet) -> Evaluation {
    let instrument = sheet.instrument();

    let sections: Vec<SectionResult> = instrument
        .sections
        .iter()
        .map(|section| {
            let items: Vec<ItemResult> = section
                .items
                .iter()
                .copied()
                .map(|label| ItemResult {
                    label,
                    score: sheet.score(label).unwrap_or(Score::NotApplicable),
                })
                .collect();
            let scores: Vec<Score> = items.iter().map(|item| item.score).collect();
            let average = compute_section_average(&scores);
            SectionResult {
                section,
                items,
                average,
            }
        })
        .collect();

    let final_result = compute_final_score(&sections, instrument.pass_threshold);

    debug!(
        active_sections = sections.iter().filter(|s| s.is_active()).count(),
        active_weight = final_result.active_weight_percent,
        final_score = ?final_result.final_score,
        "aggregated score sheet"
    );

    Evaluation {
        instrument,
        sections,
        final_result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graded(hundredths: u16) -> Score {
        Score::Graded(Grade::from_hundredths(hundredths))
    }

    fn section_result(index: usize, average: Option<u16>) -> SectionResult {
        SectionResult {
            section: &Instrument::rosario().sections[index],
            items: Vec::new(),
            average: average.map(Grade::from_hundredths),
        }
    }

    #[test]
    fn average_skips_not_applicable() {
        let scores = [graded(400), Score::NotApplicable, graded(300)];
        assert_eq!(
            compute_section_average(&scores),
            Some(Grade::from_hundredths(350))
        );
    }

    #[test]
    fn average_is_undefined_for_empty_or_all_na() {
        assert_eq!(compute_section_average(&[]), None);
        assert_eq!(
            compute_section_average(&[Score::NotApplicable, Score::NotApplicable]),
            None
        );
    }

    #[test]
    fn average_rounds_ties_up() {
        // 3.01 + 3.02 = 6.03 / 2 = 3.015
        assert_eq!(
            compute_section_average(&[graded(301), graded(302)]),
            Some(Grade::from_hundredths(302))
        );
        // 4.00 + 4.00 + 4.01 = 4.00333..
        assert_eq!(
            compute_section_average(&[graded(400), graded(400), graded(401)]),
            Some(Grade::from_hundredths(400))
        );
    }

    #[test]
    fn final_score_renormalizes_active_weights() {
        let sections = vec![
            section_result(0, None),
            section_result(1, Some(400)),
            section_result(2, Some(300)),
        ];
        let result = compute_final_score(&sections, Grade::from_hundredths(300));
        // (4.00 * 35 + 3.00 * 30) / 65 = 3.538..
        assert_eq!(result.active_weight_percent, 65);
        assert_eq!(result.final_score, Some(Grade::from_hundredths(354)));
        assert_eq!(result.passed, Some(true));
        assert_eq!(result.effective_weight(&sections[0]), None);
        assert_eq!(result.effective_weight(&sections[1]), Some(5385));
        assert_eq!(result.effective_weight(&sections[2]), Some(4615));
    }

    #[test]
    fn final_score_undefined_without_active_sections() {
        let sections = vec![
            section_result(0, None),
            section_result(1, None),
            section_result(2, None),
        ];
        let result = compute_final_score(&sections, Grade::from_hundredths(300));
        assert_eq!(result.final_score, None);
        assert_eq!(result.passed, None);
        assert_eq!(result.pass_label(), "N/A");
    }

    #[test]
    fn pass_threshold_is_inclusive() {
        let threshold = Grade::from_hundredths(300);
        let at = compute_final_score(
            &[
                section_result(0, Some(300)),
                section_result(1, Some(300)),
                section_result(2, Some(300)),
            ],
            threshold,
        );
        assert_eq!(at.passed, Some(true));
        assert_eq!(at.pass_label(), "Sí");

        let below = compute_final_score(
            &[
                section_result(0, Some(299)),
                section_result(1, Some(299)),
                section_result(2, Some(299)),
            ],
            threshold,
        );
        assert_eq!(below.final_score, Some(Grade::from_hundredths(299)));
        assert_eq!(below.pass_label(), "No");
    }
}
