// src/process/era.rs
use std::fmt;

use crate::process::date_parser::parse_date;
use crate::record::{CanonicalRecord, RawRecord};

/// Source column feeding each canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub event_type: &'static str,
    pub macro_event: &'static str,
    pub size_low: &'static str,
    pub size_high: &'static str,
    pub arrests: &'static str,
    pub lat: &'static str,
    pub lon: &'static str,
    pub claims: &'static str,
}

const HISTORICAL_COLUMNS: ColumnMap = ColumnMap {
    date: "date",
    city: "locality",
    state: "state",
    event_type: "type",
    macro_event: "macroevent",
    size_low: "size_low",
    size_high: "size_high",
    arrests: "arrests",
    lat: "lat",
    lon: "lon",
    claims: "claims",
};

const RECENT_COLUMNS: ColumnMap = ColumnMap {
    claims: "claims_verbatim",
    ..HISTORICAL_COLUMNS
};

const CURRENT_COLUMNS: ColumnMap = ColumnMap {
    event_type: "event_type",
    claims: "claims_verbatim",
    ..HISTORICAL_COLUMNS
};

/// Collection period; each one ships its own column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Era {
    /// 2017–2020, the static compiled file.
    Historical,
    /// 2021–2024, tab-separated download.
    Recent,
    /// 2025 onwards, comma-separated download.
    Current,
}

impl Era {
    /// Oldest first; this is also the output order.
    pub const ALL: [Era; 3] = [Era::Historical, Era::Recent, Era::Current];

    pub fn label(&self) -> &'static str {
        match self {
            Era::Historical => "2017-2020",
            Era::Recent => "2021-2024",
            Era::Current => "2025-present",
        }
    }

    /// Field separator used by this era's source file.
    pub fn delimiter(&self) -> u8 {
        match self {
            Era::Recent => b'\t',
            Era::Historical | Era::Current => b',',
        }
    }

    pub fn columns(&self) -> &'static ColumnMap {
        match self {
            Era::Historical => &HISTORICAL_COLUMNS,
            Era::Recent => &RECENT_COLUMNS,
            Era::Current => &CURRENT_COLUMNS,
        }
    }

    /// Map one source row into the canonical schema.
    pub fn normalize(&self, raw: &RawRecord<'_>) -> CanonicalRecord {
        let cols = self.columns();
        let field = |name: &str| raw.get(name).to_string();

        CanonicalRecord {
            date: parse_date(raw.get(cols.date)),
            city: field(cols.city),
            state: field(cols.state),
            event_type: field(cols.event_type),
            macro_event: field(cols.macro_event),
            size_low: field(cols.size_low),
            size_high: field(cols.size_high),
            arrests: field(cols.arrests),
            lat: field(cols.lat),
            lon: field(cols.lon),
            claims: field(cols.claims),
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;

    fn row(pairs: &[(&str, &str)]) -> (StringRecord, StringRecord) {
        let headers = pairs.iter().map(|(k, _)| *k).collect::<StringRecord>();
        let values = pairs.iter().map(|(_, v)| *v).collect::<StringRecord>();
        (headers, values)
    }

    #[test]
    fn test_historical_mapping() {
        let (h, v) = row(&[
            ("date", "06/14/2018"),
            ("locality", "Portland"),
            ("state", "OR"),
            ("type", "march"),
            ("macroevent", "20180614-families"),
            ("size_low", "100"),
            ("size_high", "250"),
            ("arrests", "0"),
            ("lat", "45.52"),
            ("lon", "-122.68"),
            ("claims", "family reunification"),
            ("claims_verbatim", "ignored"),
        ]);
        let rec = Era::Historical.normalize(&RawRecord::new(&h, &v));

        assert_eq!(
            rec,
            CanonicalRecord {
                date: "2018-06-14".into(),
                city: "Portland".into(),
                state: "OR".into(),
                event_type: "march".into(),
                macro_event: "20180614-families".into(),
                size_low: "100".into(),
                size_high: "250".into(),
                arrests: "0".into(),
                lat: "45.52".into(),
                lon: "-122.68".into(),
                claims: "family reunification".into(),
            }
        );
    }

    #[test]
    fn test_claims_source_per_era() {
        let (h, v) = row(&[("claims", "short"), ("claims_verbatim", "verbatim")]);
        let raw = RawRecord::new(&h, &v);

        assert_eq!(Era::Historical.normalize(&raw).claims, "short");
        assert_eq!(Era::Recent.normalize(&raw).claims, "verbatim");
        assert_eq!(Era::Current.normalize(&raw).claims, "verbatim");
    }

    #[test]
    fn test_event_type_source_per_era() {
        let (h, v) = row(&[("type", "rally"), ("event_type", "vigil")]);
        let raw = RawRecord::new(&h, &v);

        assert_eq!(Era::Historical.normalize(&raw).event_type, "rally");
        assert_eq!(Era::Recent.normalize(&raw).event_type, "rally");
        assert_eq!(Era::Current.normalize(&raw).event_type, "vigil");
    }

    #[test]
    fn test_missing_columns_are_empty() {
        let (h, v) = row(&[("locality", "Austin")]);
        let raw = RawRecord::new(&h, &v);

        for era in Era::ALL {
            let rec = era.normalize(&raw);
            assert_eq!(rec.city, "Austin");
            assert_eq!(rec.date, "");
            assert_eq!(rec.claims, "");
            assert_eq!(rec.lat, "");
        }
    }

    #[test]
    fn test_bad_calendar_date_normalizes_to_empty() {
        let (h, v) = row(&[("date", "2020/13/45"), ("locality", "Reno")]);
        let rec = Era::Recent.normalize(&RawRecord::new(&h, &v));
        assert_eq!(rec.date, "");
        assert_eq!(rec.city, "Reno");
    }

    #[test]
    fn test_labels_and_delimiters() {
        assert_eq!(Era::Recent.to_string(), "2021-2024");
        assert_eq!(Era::Current.label(), "2025-present");
        assert_eq!(Era::Historical.delimiter(), b',');
        assert_eq!(Era::Recent.delimiter(), b'\t');
        assert_eq!(Era::Current.delimiter(), b',');
    }
}
