use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d", "%d-%b-%Y", "%b %d, %Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%z"];

/// Parse a calendar day from the date spellings found in market data exports.
///
/// Timestamps are accepted and truncated to their date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Index of the first date that does not come strictly after its
/// predecessor. Unparseable dates are ignored.
pub fn first_out_of_order(dates: &[&str]) -> Option<usize> {
    let mut previous: Option<NaiveDate> = None;

    for (i, raw) in dates.iter().enumerate() {
        let Some(date) = parse_date(raw) else {
            continue;
        };
        if let Some(prev) = previous {
            if date <= prev {
                return Some(i);
            }
        }
        previous = Some(date);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date("2024-03-15"), Some(expected));
        assert_eq!(parse_date("2024/03/15"), Some(expected));
        assert_eq!(parse_date("03/15/2024"), Some(expected));
        assert_eq!(parse_date("20240315"), Some(expected));
        assert_eq!(parse_date("2024-03-15 00:00:00"), Some(expected));
        assert_eq!(parse_date("2024-03-15T09:30:00+00:00"), Some(expected));
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_first_out_of_order() {
        assert_eq!(first_out_of_order(&["2024-01-01", "2024-01-02", "2024-01-03"]), None);
        assert_eq!(first_out_of_order(&["2024-01-01", "2024-01-03", "2024-01-02"]), Some(2));
        assert_eq!(first_out_of_order(&["2024-01-01", "2024-01-01"]), Some(1));
        assert_eq!(first_out_of_order(&["2024-01-01", "junk", "2024-01-02"]), None);
    }
}
