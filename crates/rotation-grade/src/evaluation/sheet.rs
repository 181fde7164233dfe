use super::domain::{Score, ScoreParseError};
use super::instrument::Instrument;
use std::collections::HashMap;

/// Error raised while assembling a score sheet from submitted data.
#[derive(Debug, thiserror::Error)]
pub enum ScoreSheetError {
    #[error("'{0}' is not an item of the instrument")]
    UnknownItem(String),
    #[error("item '{0}' was scored more than once")]
    DuplicateItem(&'static str),
    #[error("item '{0}' has no score; mark it N/A if it was not evaluated")]
    MissingItem(&'static str),
    #[error("invalid score for '{label}': {source}")]
    InvalidScore {
        label: String,
        #[source]
        source: ScoreParseError,
    },
    /// Raised by `Observations::from_lines`; observations travel with the
    /// sheet through intake, so they share its error type.
    #[error("at most 3 observations are accepted, got {0}")]
    TooManyObservations(usize),
    #[error("failed to read score sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid score sheet CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid score sheet JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A completed sheet: exactly one score for every item of its instrument.
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct ScoreSheet {
    instrument: &'static Instrument,
    scores: HashMap<&'static str, Score>,
}

impl ScoreSheet {
    pub fn from_entries<I, L>(
        instrument: &'static Instrument,
        entries: I,
    ) -> Result<Self, ScoreSheetError>
    where
        I: IntoIterator<Item = (L, Score)>,
        L: AsRef<str>,
    {
        let mut scores = HashMap::with_capacity(instrument.item_count());

        for (label, score) in entries {
            let label = label.as_ref();
            let item = instrument
                .find_item(label)
                .ok_or_else(|| ScoreSheetError::UnknownItem(label.to_string()))?;
            if scores.insert(item, score).is_some() {
                return Err(ScoreSheetError::DuplicateItem(item));
            }
        }

        if let Some((_, missing)) = instrument
            .items()
            .find(|(_, item)| !scores.contains_key(item))
        {
            return Err(ScoreSheetError::MissingItem(missing));
        }

        Ok(Self { instrument, scores })
    }

    /// Every item scored with the same value, handy for fixtures and demos.
    pub fn uniform(instrument: &'static Instrument, score: Score) -> Self {
        let scores = instrument.items().map(|(_, item)| (item, score)).collect();
        Self { instrument, scores }
    }

    pub fn instrument(&self) -> &'static Instrument {
        self.instrument
    }

    pub fn score(&self, item: &str) -> Option<Score> {
        self.scores.get(item).copied()
    }

    /// Returns a copy with one item re-scored. Unknown labels are rejected.
    pub fn with_score(&self, label: &str, score: Score) -> Result<Self, ScoreSheetError> {
        let item = self
            .instrument
            .find_item(label)
            .ok_or_else(|| ScoreSheetError::UnknownItem(label.to_string()))?;
        let mut next = self.clone();
        next.scores.insert(item, score);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::domain::Grade;

    fn all_entries(score: Score) -> Vec<(&'static str, Score)> {
        Instrument::rosario()
            .items()
            .map(|(_, item)| (item, score))
            .collect()
    }

    #[test]
    fn accepts_complete_sheet() {
        let sheet = ScoreSheet::from_entries(Instrument::rosario(), all_entries(Score::graded(4.0)))
            .expect("complete sheet");
        assert_eq!(
            sheet.score("3.8 Iniciativa"),
            Some(Score::Graded(Grade::from_hundredths(400)))
        );
    }

    #[test]
    fn rejects_missing_items() {
        let mut entries = all_entries(Score::NotApplicable);
        entries.retain(|(item, _)| *item != "2.7 Participación en reuniones científicas");
        match ScoreSheet::from_entries(Instrument::rosario(), entries) {
            Err(ScoreSheetError::MissingItem(item)) => {
                assert_eq!(item, "2.7 Participación en reuniones científicas")
            }
            other => panic!("expected missing item, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_and_duplicate_items() {
        let mut entries = all_entries(Score::NotApplicable);
        entries.push(("9.9 Puntualidad", Score::NotApplicable));
        assert!(matches!(
            ScoreSheet::from_entries(Instrument::rosario(), entries),
            Err(ScoreSheetError::UnknownItem(label)) if label == "9.9 Puntualidad"
        ));

        let mut entries = all_entries(Score::NotApplicable);
        entries.push(("3.7  cumplimiento", Score::graded(2.0)));
        assert!(matches!(
            ScoreSheet::from_entries(Instrument::rosario(), entries),
            Err(ScoreSheetError::DuplicateItem("3.7 Cumplimiento"))
        ));
    }

    #[test]
    fn with_score_replaces_single_item() {
        let sheet = ScoreSheet::uniform(Instrument::rosario(), Score::graded(5.0));
        let updated = sheet
            .with_score("1.1 Conocimientos ciencias", Score::NotApplicable)
            .expect("known item");
        assert_eq!(
            updated.score("1.1 Conocimientos ciencias"),
            Some(Score::NotApplicable)
        );
        assert_eq!(
            sheet.score("1.1 Conocimientos ciencias"),
            Some(Score::Graded(Grade::MAX))
        );
    }
}
