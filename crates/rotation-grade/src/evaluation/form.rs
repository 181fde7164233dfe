use super::sheet::{ScoreSheet, ScoreSheetError};
use serde::{Deserialize, Serialize};

/// Number of free-text observation lines printed on every form.
pub const OBSERVATION_LINES: usize = 3;

/// Free-text header and footer fields of the form. Blank fields print empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationMetadata {
    pub student_name: String,
    pub rotation: String,
    pub period: String,
    pub hospital: String,
    pub program: String,
    pub evaluator: String,
    pub signature: String,
    /// Printed verbatim; today's date is used when absent or blank.
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Observations([String; OBSERVATION_LINES]);

impl Observations {
    /// Pads to three lines; more than three is rejected.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, ScoreSheetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.len() > OBSERVATION_LINES {
            return Err(ScoreSheetError::TooManyObservations(lines.len()));
        }

        let mut padded: [String; OBSERVATION_LINES] = Default::default();
        for (slot, line) in padded.iter_mut().zip(lines) {
            *slot = line;
        }
        Ok(Self(padded))
    }

    pub fn lines(&self) -> &[String; OBSERVATION_LINES] {
        &self.0
    }
}

/// Everything the form hands over once the evaluator submits it.
#[derive(Debug, Clone)]
pub struct EvaluationInput {
    pub metadata: EvaluationMetadata,
    pub sheet: ScoreSheet,
    pub observations: Observations,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observations_pad_to_three_lines() {
        let observations = Observations::from_lines(["Puntual"]).expect("one line");
        assert_eq!(
            observations.lines(),
            &["Puntual".to_string(), String::new(), String::new()]
        );
    }

    #[test]
    fn observations_reject_a_fourth_line() {
        let error = Observations::from_lines(["a", "b", "c", "d"]).expect_err("too many");
        assert!(matches!(error, ScoreSheetError::TooManyObservations(4)));
    }
}
