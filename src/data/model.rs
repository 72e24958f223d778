use std::fmt;

use serde::Deserialize;

pub const LAUNCH_SITE_COLUMN: &str = "Launch Site";
pub const MISSION_OUTCOME_COLUMN: &str = "Mission Outcome";
pub const PAYLOAD_MASS_COLUMN: &str = "Payload Mass (kg)";

// ---------------------------------------------------------------------------
// LaunchSite / SiteSelector – the fixed site enumeration
// ---------------------------------------------------------------------------

/// The four launch sites the dashboard offers in its selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LaunchSite {
    CcafsLc40,
    VafbSlc4e,
    KscLc39a,
    CcafsSlc40,
}

impl LaunchSite {
    pub const ALL: [LaunchSite; 4] = [
        LaunchSite::CcafsLc40,
        LaunchSite::VafbSlc4e,
        LaunchSite::KscLc39a,
        LaunchSite::CcafsSlc40,
    ];

    /// Site name exactly as it appears in the `Launch Site` column.
    pub fn as_str(self) -> &'static str {
        match self {
            LaunchSite::CcafsLc40 => "CCAFS LC-40",
            LaunchSite::VafbSlc4e => "VAFB SLC-4E",
            LaunchSite::KscLc39a => "KSC LC-39A",
            LaunchSite::CcafsSlc40 => "CCAFS SLC-40",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|site| site.as_str() == name)
    }
}

impl fmt::Display for LaunchSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Site choice coming from the presentation layer.
///
/// Anything that is neither `ALL` nor a known site parses to `Unknown`,
/// which every view resolves to an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelector {
    #[default]
    All,
    Site(LaunchSite),
    Unknown(String),
}

impl SiteSelector {
    pub const ALL_SENTINEL: &'static str = "ALL";

    pub fn parse(value: &str) -> Self {
        if value == Self::ALL_SENTINEL {
            return SiteSelector::All;
        }
        match LaunchSite::from_name(value) {
            Some(site) => SiteSelector::Site(site),
            None => SiteSelector::Unknown(value.to_string()),
        }
    }

    /// Whether a row from `launch_site` belongs to this selection.
    pub fn matches(&self, launch_site: &str) -> bool {
        match self {
            SiteSelector::All => true,
            SiteSelector::Site(site) => site.as_str() == launch_site,
            SiteSelector::Unknown(_) => false,
        }
    }

    /// Selector value as the presentation layer passes it around.
    pub fn value(&self) -> &str {
        match self {
            SiteSelector::All => Self::ALL_SENTINEL,
            SiteSelector::Site(site) => site.as_str(),
            SiteSelector::Unknown(name) => name,
        }
    }

    /// Every selector offered in the drop-down, `ALL` first.
    pub fn options() -> impl Iterator<Item = SiteSelector> {
        std::iter::once(SiteSelector::All).chain(LaunchSite::ALL.into_iter().map(SiteSelector::Site))
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelector::All => f.write_str("All Sites"),
            other => f.write_str(other.value()),
        }
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// A launch row as read from the source file, payload mass still raw text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawLaunchRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Mission Outcome")]
    pub mission_outcome: String,
    /// `None` when the cell is empty / null / absent.
    #[serde(rename = "Payload Mass (kg)", default)]
    pub payload_mass: Option<String>,
}

/// A normalized launch row.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub mission_outcome: String,
    /// Finite or ±infinity. `None` only survives under
    /// [`MissingPayload::Keep`](super::normalize::MissingPayload::Keep).
    pub payload_mass_kg: Option<f64>,
}

// ---------------------------------------------------------------------------
// Payload range / bounds
// ---------------------------------------------------------------------------

/// Closed interval `[low, high]` over payload mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Inclusive on both ends. NaN never matches.
    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }
}

/// Global min / max of the normalized payload column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

impl PayloadBounds {
    /// Fold the present values of a column. `None` if nothing is present.
    pub fn of<'a>(masses: impl IntoIterator<Item = &'a Option<f64>>) -> Option<Self> {
        masses
            .into_iter()
            .flatten()
            .fold(None, |acc: Option<PayloadBounds>, &mass| {
                Some(match acc {
                    None => PayloadBounds { min: mass, max: mass },
                    Some(b) => PayloadBounds {
                        min: b.min.min(mass),
                        max: b.max.max(mass),
                    },
                })
            })
    }

    pub fn as_range(&self) -> PayloadRange {
        PayloadRange::new(self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// LaunchContext – the normalized dataset, built once
// ---------------------------------------------------------------------------

/// Normalized table plus derived statistics. Built once at startup and only
/// ever handed out by shared reference.
#[derive(Debug, Clone)]
pub struct LaunchContext {
    records: Vec<LaunchRecord>,
    bounds: Option<PayloadBounds>,
}

impl LaunchContext {
    pub fn new(records: Vec<LaunchRecord>) -> Self {
        let bounds = PayloadBounds::of(records.iter().map(|r| &r.payload_mass_kg));
        LaunchContext { records, bounds }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn bounds(&self) -> Option<PayloadBounds> {
        self.bounds
    }

    pub fn max_payload(&self) -> Option<f64> {
        self.bounds.map(|b| b.max)
    }

    pub fn min_payload(&self) -> Option<f64> {
        self.bounds.map(|b| b.min)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
