//! Payload-mass cleaning pipeline.
//!
//! Raw cells go through five named steps, in this order:
//!
//! 1. [`strip_approximation`] drops every `~`
//! 2. [`resolve_classified`] turns `Classified` into `+inf`
//! 3. [`fill_missing`] applies the [`MissingPayload`] policy
//! 4. [`strip_thousands_separators`] drops every `,`
//! 5. [`parse_mass`] parses what is left as `f64`
//!
//! Steps 1–4 are total; only step 5 can fail.

use serde::Deserialize;

use super::model::{LaunchContext, LaunchRecord, RawLaunchRecord};
use crate::error::{DashError, Result};

pub const APPROXIMATION_MARKER: char = '~';
pub const THOUSANDS_SEPARATOR: char = ',';
pub const CLASSIFIED_MARKER: &str = "Classified";

/// Cell texts that delimited-text exports use for "no value". Matched
/// exactly, the way pandas' `read_csv` does by default.
pub const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a delimited-text cell stands for an absent value.
pub fn is_missing_marker(text: &str) -> bool {
    text.is_empty() || MISSING_MARKERS.contains(&text)
}

/// What to do with payload cells that are absent in the source.
///
/// `Keep` is the default: absent masses stay `None`, never match a payload
/// range and are left out of min/max, but the rows still count in outcome
/// proportions. `NegativeInfinity` fills them with `-inf`, so they sit below
/// every finite mass and show up as the global minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPayload {
    #[default]
    Keep,
    NegativeInfinity,
}

/// Intermediate value of a payload cell between pipeline steps.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadCell {
    Text(String),
    Value(f64),
    Missing,
}

impl From<Option<String>> for PayloadCell {
    fn from(raw: Option<String>) -> Self {
        match raw {
            Some(text) => PayloadCell::Text(text),
            None => PayloadCell::Missing,
        }
    }
}

pub fn strip_approximation(cell: PayloadCell) -> PayloadCell {
    match cell {
        PayloadCell::Text(text) => PayloadCell::Text(text.replace(APPROXIMATION_MARKER, "")),
        other => other,
    }
}

pub fn resolve_classified(cell: PayloadCell) -> PayloadCell {
    match cell {
        PayloadCell::Text(text) if text.trim() == CLASSIFIED_MARKER => {
            PayloadCell::Value(f64::INFINITY)
        }
        other => other,
    }
}

pub fn fill_missing(cell: PayloadCell, policy: MissingPayload) -> PayloadCell {
    match (cell, policy) {
        (PayloadCell::Missing, MissingPayload::NegativeInfinity) => {
            PayloadCell::Value(f64::NEG_INFINITY)
        }
        (other, _) => other,
    }
}

pub fn strip_thousands_separators(cell: PayloadCell) -> PayloadCell {
    match cell {
        PayloadCell::Text(text) => PayloadCell::Text(text.replace(THOUSANDS_SEPARATOR, "")),
        other => other,
    }
}

/// Final step. Text must parse to a non-NaN float; `Err` carries the cleaned
/// text that failed.
pub fn parse_mass(cell: PayloadCell) -> std::result::Result<Option<f64>, String> {
    match cell {
        PayloadCell::Text(text) => match text.trim().parse::<f64>() {
            Ok(mass) if !mass.is_nan() => Ok(Some(mass)),
            _ => Err(text),
        },
        PayloadCell::Value(mass) => Ok(Some(mass)),
        PayloadCell::Missing => Ok(None),
    }
}

/// Run the whole pipeline on one raw cell.
pub fn normalize_payload(
    raw: Option<&str>,
    policy: MissingPayload,
) -> std::result::Result<Option<f64>, String> {
    let cell = PayloadCell::from(raw.map(str::to_string));
    let cell = strip_approximation(cell);
    let cell = resolve_classified(cell);
    let cell = fill_missing(cell, policy);
    let cell = strip_thousands_separators(cell);
    parse_mass(cell)
}

/// Normalize every raw row. `row` in errors is the 1-based data row of the
/// source (header excluded).
pub fn normalize_records(
    raw: Vec<RawLaunchRecord>,
    policy: MissingPayload,
) -> Result<Vec<LaunchRecord>> {
    let mut missing = 0usize;
    let records = raw
        .into_iter()
        .enumerate()
        .map(|(i, rec)| -> Result<LaunchRecord> {
            let payload_mass_kg = normalize_payload(rec.payload_mass.as_deref(), policy)
                .map_err(|_| DashError::MalformedPayloadValue {
                    row: i + 1,
                    value: rec.payload_mass.clone().unwrap_or_default(),
                })?;
            if payload_mass_kg.is_none() {
                missing += 1;
            }
            Ok(LaunchRecord {
                launch_site: rec.launch_site,
                mission_outcome: rec.mission_outcome,
                payload_mass_kg,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if missing > 0 {
        log::warn!("{missing} rows have no payload mass and are excluded from payload ranges");
    }
    Ok(records)
}

/// Normalize raw rows and derive the global payload bounds.
pub fn build_context(raw: Vec<RawLaunchRecord>, policy: MissingPayload) -> Result<LaunchContext> {
    let records = normalize_records(raw, policy)?;
    Ok(LaunchContext::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(site: &str, outcome: &str, mass: Option<&str>) -> RawLaunchRecord {
        RawLaunchRecord {
            launch_site: site.to_string(),
            mission_outcome: outcome.to_string(),
            payload_mass: mass.map(str::to_string),
        }
    }

    #[test]
    fn approximate_classified_is_positive_infinity() {
        assert_eq!(
            normalize_payload(Some("~Classified"), MissingPayload::Keep),
            Ok(Some(f64::INFINITY))
        );
    }

    #[test]
    fn thousands_separator_is_removed() {
        assert_eq!(
            normalize_payload(Some("1,500"), MissingPayload::Keep),
            Ok(Some(1500.0))
        );
        assert_eq!(
            normalize_payload(Some("~4,700"), MissingPayload::Keep),
            Ok(Some(4700.0))
        );
    }

    #[test]
    fn plain_numbers_parse() {
        assert_eq!(normalize_payload(Some("525"), MissingPayload::Keep), Ok(Some(525.0)));
        assert_eq!(normalize_payload(Some("2,395.5"), MissingPayload::Keep), Ok(Some(2395.5)));
        assert_eq!(normalize_payload(Some(" 677 "), MissingPayload::Keep), Ok(Some(677.0)));
    }

    #[test]
    fn missing_follows_policy() {
        assert_eq!(normalize_payload(None, MissingPayload::Keep), Ok(None));
        assert_eq!(
            normalize_payload(None, MissingPayload::NegativeInfinity),
            Ok(Some(f64::NEG_INFINITY))
        );
    }

    #[test]
    fn classified_only_matches_whole_value() {
        assert_eq!(
            normalize_payload(Some("Classified payload"), MissingPayload::Keep),
            Err("Classified payload".to_string())
        );
    }

    #[test]
    fn nan_and_text_are_rejected() {
        assert!(normalize_payload(Some("NaN"), MissingPayload::Keep).is_err());
        assert!(normalize_payload(Some("unknown"), MissingPayload::Keep).is_err());
        assert!(normalize_payload(Some(""), MissingPayload::Keep).is_err());
    }

    #[test]
    fn steps_leave_other_variants_untouched() {
        let value = PayloadCell::Value(3.0);
        assert_eq!(strip_approximation(value.clone()), value);
        assert_eq!(strip_thousands_separators(PayloadCell::Missing), PayloadCell::Missing);
        assert_eq!(
            fill_missing(PayloadCell::Text("1".into()), MissingPayload::NegativeInfinity),
            PayloadCell::Text("1".into())
        );
    }

    #[test]
    fn csv_missing_markers_follow_policy() {
        use crate::data::loader::read_csv;

        let csv = "Launch Site,Mission Outcome,Payload Mass (kg)\n\
                   KSC LC-39A,Success,N/A\n\
                   KSC LC-39A,Success,NaN\n\
                   KSC LC-39A,Success,null\n\
                   KSC LC-39A,Success,\"1,500\"\n";

        let kept = normalize_records(read_csv(csv.as_bytes()).unwrap(), MissingPayload::Keep).unwrap();
        let masses: Vec<Option<f64>> = kept.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(masses, [None, None, None, Some(1500.0)]);

        let filled = normalize_records(
            read_csv(csv.as_bytes()).unwrap(),
            MissingPayload::NegativeInfinity,
        )
        .unwrap();
        let masses: Vec<Option<f64>> = filled.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(
            masses,
            [
                Some(f64::NEG_INFINITY),
                Some(f64::NEG_INFINITY),
                Some(f64::NEG_INFINITY),
                Some(1500.0)
            ]
        );
    }

    #[test]
    fn missing_markers_match_exactly() {
        assert!(is_missing_marker("N/A"));
        assert!(is_missing_marker("NaN"));
        assert!(is_missing_marker(""));
        assert!(!is_missing_marker(" NaN"));
        assert!(!is_missing_marker("Classified"));
    }

    #[test]
    fn malformed_value_reports_row_and_raw_text() {
        let err = normalize_records(
            vec![
                raw("CCAFS LC-40", "Success", Some("525")),
                raw("CCAFS LC-40", "Success", Some("~heavy")),
            ],
            MissingPayload::Keep,
        )
        .unwrap_err();
        match err {
            DashError::MalformedPayloadValue { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "~heavy");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn context_bounds_follow_normalized_column() {
        let ctx = build_context(
            vec![
                raw("CCAFS LC-40", "Success", Some("~Classified")),
                raw("VAFB SLC-4E", "Success", Some("1,500")),
                raw("KSC LC-39A", "Failure (in flight)", Some("~20")),
                raw("KSC LC-39A", "Success", None),
            ],
            MissingPayload::Keep,
        )
        .unwrap();
        assert_eq!(ctx.len(), 4);
        assert_eq!(ctx.max_payload(), Some(f64::INFINITY));
        assert_eq!(ctx.min_payload(), Some(20.0));
        assert_eq!(ctx.records()[3].payload_mass_kg, None);

        let filled = build_context(
            vec![
                raw("VAFB SLC-4E", "Success", Some("1,500")),
                raw("KSC LC-39A", "Success", None),
            ],
            MissingPayload::NegativeInfinity,
        )
        .unwrap();
        assert_eq!(filled.min_payload(), Some(f64::NEG_INFINITY));
        assert_eq!(filled.max_payload(), Some(1500.0));
    }
}
