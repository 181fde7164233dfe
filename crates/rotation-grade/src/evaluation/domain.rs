use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Highest grade on the rotation scale, in hundredths.
pub const MAX_HUNDREDTHS: u16 = 500;

/// A grade on the 0.00–5.00 scale stored as whole hundredths so that
/// averaging and rounding stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Grade(u16);

impl Grade {
    pub const MIN: Grade = Grade(0);
    pub const MAX: Grade = Grade(MAX_HUNDREDTHS);

    /// Builds a grade from hundredths, saturating at 5.00.
    pub const fn from_hundredths(hundredths: u16) -> Self {
        if hundredths > MAX_HUNDREDTHS {
            Grade(MAX_HUNDREDTHS)
        } else {
            Grade(hundredths)
        }
    }

    /// Clamps into range and rounds to two decimals. `NaN` maps to 0.00.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Grade::MIN;
        }
        let hundredths = (value.clamp(0.0, 5.0) * 100.0).round();
        Grade::from_hundredths(hundredths as u16)
    }

    pub const fn hundredths(self) -> u16 {
        self.0
    }

    pub fn value(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

/// Literal used wherever an undefined value is displayed.
pub const NOT_APPLICABLE_LABEL: &str = "N/A";

/// Outcome recorded for one item: a grade, or explicitly not evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Graded(Grade),
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a grade between 0.00 and 5.00 or N/A")]
pub struct ScoreParseError(pub String);

impl Score {
    /// Clamped numeric entry, mirroring the bounded input control.
    pub fn graded(value: f64) -> Self {
        Score::Graded(Grade::clamped(value))
    }

    pub fn parse(raw: &str) -> Result<Self, ScoreParseError> {
        let trimmed = raw.trim();
        if is_not_applicable_token(trimmed) {
            return Ok(Score::NotApplicable);
        }

        let value: f64 = trimmed
            .replace(',', ".")
            .parse()
            .map_err(|_| ScoreParseError(raw.to_string()))?;
        if !value.is_finite() {
            return Err(ScoreParseError(raw.to_string()));
        }

        Ok(Score::graded(value))
    }

    pub fn grade(self) -> Option<Grade> {
        match self {
            Score::Graded(grade) => Some(grade),
            Score::NotApplicable => None,
        }
    }
}

fn is_not_applicable_token(value: &str) -> bool {
    if value.is_empty() || value == "-" {
        return true;
    }
    let lowered = value.to_lowercase();
    matches!(lowered.as_str(), "n/a" | "na" | "no aplica" | "n.a.")
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Graded(grade) => grade.fmt(f),
            Score::NotApplicable => f.write_str(NOT_APPLICABLE_LABEL),
        }
    }
}

/// Formats an optional grade the way every report surface does.
pub fn format_optional(grade: Option<Grade>) -> String {
    match grade {
        Some(grade) => grade.to_string(),
        None => NOT_APPLICABLE_LABEL.to_string(),
    }
}

/// `5385` (hundredths of a percent) prints as `53.85%`.
pub fn format_percent(hundredths: u32) -> String {
    format!("{}.{:02}%", hundredths / 100, hundredths % 100)
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Score::Graded(grade) => grade.serialize(serializer),
            Score::NotApplicable => serializer.serialize_str(NOT_APPLICABLE_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScoreVisitor)
    }
}

struct ScoreVisitor;

impl<'de> Visitor<'de> for ScoreVisitor {
    type Value = Score;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a grade between 0 and 5, \"N/A\", or null")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Score, E> {
        if value.is_finite() {
            Ok(Score::graded(value))
        } else {
            Err(E::custom("grade must be a finite number"))
        }
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Score, E> {
        Ok(Score::graded(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Score, E> {
        Ok(Score::graded(value as f64))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Score, E> {
        Score::parse(value).map_err(E::custom)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Score, E> {
        Ok(Score::NotApplicable)
    }

    fn visit_none<E: de::Error>(self) -> Result<Score, E> {
        Ok(Score::NotApplicable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_clamps_and_rounds() {
        assert_eq!(Grade::clamped(7.2), Grade::MAX);
        assert_eq!(Grade::clamped(-1.0), Grade::MIN);
        assert_eq!(Grade::clamped(3.456).hundredths(), 346);
        assert_eq!(Grade::clamped(f64::NAN), Grade::MIN);
    }

    #[test]
    fn grade_displays_two_decimals() {
        assert_eq!(Grade::from_hundredths(300).to_string(), "3.00");
        assert_eq!(Grade::from_hundredths(405).to_string(), "4.05");
        assert_eq!(Grade::from_hundredths(9).to_string(), "0.09");
    }

    #[test]
    fn percent_keeps_two_decimals() {
        assert_eq!(format_percent(5385), "53.85%");
        assert_eq!(format_percent(10_000), "100.00%");
    }

    #[test]
    fn parse_accepts_not_applicable_tokens() {
        for token in ["", "  ", "N/A", "na", "No aplica", "-"] {
            assert_eq!(Score::parse(token), Ok(Score::NotApplicable), "{token:?}");
        }
    }

    #[test]
    fn parse_accepts_decimal_comma_and_clamps() {
        assert_eq!(
            Score::parse("4,5"),
            Ok(Score::Graded(Grade::from_hundredths(450)))
        );
        assert_eq!(Score::parse("9"), Ok(Score::Graded(Grade::MAX)));
        assert!(Score::parse("excelente").is_err());
        assert!(Score::parse("inf").is_err());
    }

    #[test]
    fn score_json_accepts_numbers_strings_and_null() {
        let scores: Vec<Score> =
            serde_json::from_str(r#"[4.25, 3, "N/A", null, "2,5"]"#).expect("scores parse");
        assert_eq!(
            scores,
            vec![
                Score::Graded(Grade::from_hundredths(425)),
                Score::Graded(Grade::from_hundredths(300)),
                Score::NotApplicable,
                Score::NotApplicable,
                Score::Graded(Grade::from_hundredths(250)),
            ]
        );
        let encoded = serde_json::to_string(&scores[..3]).expect("serialize");
        assert_eq!(encoded, r#"[4.25,3.0,"N/A"]"#);
    }
}
