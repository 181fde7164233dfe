use chrono::NaiveDate;

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date(" 2024-03-15 "),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid"))
        );
        assert!(parse_date("15/03/2024").is_err());
    }
}
