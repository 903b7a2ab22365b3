use chrono::NaiveDate;

/// One accepted input layout: three unsigned numeric parts joined by `sep`,
/// with a four-digit year at `year_pos`.
struct DateLayout {
    fmt: &'static str,
    sep: char,
    year_pos: usize,
}

/// Accepted input layouts, tried in order.
const DATE_LAYOUTS: &[DateLayout] = &[
    DateLayout {
        fmt: "%Y-%m-%d",
        sep: '-',
        year_pos: 0,
    },
    DateLayout {
        fmt: "%m/%d/%Y",
        sep: '/',
        year_pos: 2,
    },
    DateLayout {
        fmt: "%Y/%m/%d",
        sep: '/',
        year_pos: 0,
    },
];

impl DateLayout {
    /// chrono's `%Y` takes a sign and fewer than four digits, so the shape is
    /// checked before parsing.
    fn matches_shape(&self, s: &str) -> bool {
        let parts: Vec<&str> = s.split(self.sep).collect();
        parts.len() == 3
            && parts
                .iter()
                .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
            && parts[self.year_pos].len() == 4
    }

    fn parse(&self, s: &str) -> Option<NaiveDate> {
        if !self.matches_shape(s) {
            return None;
        }
        NaiveDate::parse_from_str(s, self.fmt).ok()
    }
}

/// Parse a source date into `"YYYY-MM-DD"`.
///
/// Blank values and the literal `NA` give an empty string, as does anything
/// none of [`DATE_LAYOUTS`] can read. Callers never see a parse error.
pub fn parse_date(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() || s == "NA" {
        return String::new();
    }

    DATE_LAYOUTS
        .iter()
        .find_map(|layout| layout.parse(s))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
