use chrono::NaiveDate;

const FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d", "%d.%m.%Y"];

/// Normalises an OCR date into the `YYYY-MM-DD` form used by date inputs.
/// Returns `None` when the text is not a recognisable date.
pub fn to_input_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_card_formats() {
        assert_eq!(to_input_date("1990-01-01").as_deref(), Some("1990-01-01"));
        assert_eq!(to_input_date("15/08/1987").as_deref(), Some("1987-08-15"));
        assert_eq!(to_input_date(" 15-08-1987 ").as_deref(), Some("1987-08-15"));
        assert_eq!(to_input_date("1987/08/15").as_deref(), Some("1987-08-15"));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(to_input_date(""), None);
        assert_eq!(to_input_date("YOB 1990"), None);
        assert_eq!(to_input_date("31/02/1990"), None);
    }
}
