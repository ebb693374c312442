//! Month-precision dates as the editor stores them ("YYYY-MM").

use std::fmt;

/// A year and month parsed from the exact `YYYY-MM` shape. Ordering is chronological.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: u16,
    pub month: u8,
}

impl YearMonth {
    /// Parses exactly four ASCII digits, a dash and two ASCII digits. Anything else,
    /// including surrounding whitespace, is [None].
    pub fn parse(s: &str) -> Option<YearMonth> {
        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return None;
        }
        let (year, month) = (&s[..4], &s[5..]);
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(YearMonth {
            year: year.parse().ok()?,
            month: month.parse().ok()?,
        })
    }
}

impl fmt::Display for YearMonth {
    /// `MM/YYYY`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

/// Render a stored date as `MM/YYYY`, or as an empty string when it isn't `YYYY-MM`
pub fn format_month_year(date: &str) -> String {
    YearMonth::parse(date)
        .map(|ym| ym.to_string())
        .unwrap_or_default()
}

/// `"{start} - {end}"`, where a current entry ends at `present` and a missing date is
/// rendered empty (leaving a dangling dash)
pub fn format_range(start: &str, end: Option<&str>, present: &str) -> String {
    let end = match end {
        Some(end) => format_month_year(end),
        None => present.to_string(),
    };
    format!("{} - {}", format_month_year(start), end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_month_and_year() {
        assert_eq!(format_month_year("2021-05"), "05/2021");
        assert_eq!(format_month_year("1999-12"), "12/1999");
    }

    #[test]
    fn anything_else_is_empty() {
        assert_eq!(format_month_year(""), "");
        assert_eq!(format_month_year("not-a-date"), "");
        assert_eq!(format_month_year("2021-5"), "");
        assert_eq!(format_month_year("2021-05-01"), "");
        assert_eq!(format_month_year(" 2021-05"), "");
        assert_eq!(format_month_year("２０２１-05"), "");
        assert_eq!(format_month_year("20a1-05"), "");
    }

    #[test]
    fn orders_chronologically() {
        let a = YearMonth::parse("2019-11").expect("parses");
        let b = YearMonth::parse("2020-01").expect("parses");
        assert!(b > a);
        assert!(Some(a) > None);
    }

    #[test]
    fn ranges_keep_dangling_dashes() {
        assert_eq!(format_range("2020-01", None, "Presente"), "01/2020 - Presente");
        assert_eq!(
            format_range("2018-03", Some("2020-01"), "Presente"),
            "03/2018 - 01/2020"
        );
        assert_eq!(format_range("2018-03", Some(""), "Presente"), "03/2018 - ");
        assert_eq!(format_range("", Some(""), "Presente"), " - ");
    }
}
