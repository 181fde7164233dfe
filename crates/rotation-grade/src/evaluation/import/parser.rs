use crate::evaluation::domain::Score;
use crate::evaluation::instrument::Instrument;
use crate::evaluation::sheet::ScoreSheetError;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Debug)]
pub(crate) struct ScoreRecord {
    pub(crate) label: String,
    pub(crate) score: Score,
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    #[serde(rename = "item", alias = "Ítem", alias = "Item", alias = "ítem")]
    item: String,
    #[serde(
        rename = "score",
        alias = "Calificación",
        alias = "calificacion",
        alias = "Calificacion",
        default
    )]
    score: String,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ScoreRecord>, ScoreSheetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<ScoreRow>() {
        let row = row?;
        if row.item.trim().is_empty() {
            continue;
        }
        let score = Score::parse(&row.score).map_err(|source| ScoreSheetError::InvalidScore {
            label: row.item.clone(),
            source,
        })?;
        records.push(ScoreRecord {
            label: row.item,
            score,
        });
    }

    Ok(records)
}

#[derive(Debug, Serialize)]
struct TemplateRow<'a> {
    section: String,
    item: &'a str,
    score: &'a str,
}

/// Writes a blank sheet, one row per item in declared order.
pub fn write_csv_template<W: Write>(
    instrument: &Instrument,
    writer: W,
) -> Result<(), ScoreSheetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (section, item) in instrument.items() {
        csv_writer.serialize(TemplateRow {
            section: section.title(),
            item,
            score: "",
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
