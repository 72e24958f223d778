use std::collections::BTreeMap;

use super::model::{LaunchContext, LaunchRecord, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// One slice of the outcome-proportion chart.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeShare<'a> {
    pub outcome: &'a str,
    pub count: usize,
    /// `count` divided by the number of rows in the view.
    pub fraction: f64,
}

/// One point of the payload/outcome scatter chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint<'a> {
    pub payload_mass_kg: f64,
    pub mission_outcome: &'a str,
    pub launch_site: &'a str,
}

// ---------------------------------------------------------------------------
// Proportion view
// ---------------------------------------------------------------------------

/// Group the selected rows by mission outcome, ordered by outcome name.
///
/// No payload filtering is applied. A selection with no rows (including an
/// unknown site) yields an empty vec.
pub fn get_proportions<'a>(ctx: &'a LaunchContext, selector: &SiteSelector) -> Vec<OutcomeShare<'a>> {
    let mut counts: BTreeMap<&'a str, usize> = BTreeMap::new();
    for rec in ctx.records().iter().filter(|r| selector.matches(&r.launch_site)) {
        *counts.entry(rec.mission_outcome.as_str()).or_default() += 1;
    }

    let total: usize = counts.values().sum();
    let shares: Vec<OutcomeShare<'a>> = counts
        .into_iter()
        .map(|(outcome, count)| OutcomeShare {
            outcome,
            count,
            fraction: count as f64 / total as f64,
        })
        .collect();

    log::debug!(
        "proportions for {}: {} rows in {} categories",
        selector.value(),
        total,
        shares.len()
    );
    shares
}

// ---------------------------------------------------------------------------
// Scatter view
// ---------------------------------------------------------------------------

/// Return the rows whose payload mass lies in `range` (inclusive) and whose
/// site matches `selector`, in source order.
///
/// Absent masses never match; `+inf` matches when `range.high` is `+inf`.
pub fn get_scatter_rows<'a>(
    ctx: &'a LaunchContext,
    selector: &SiteSelector,
    range: PayloadRange,
) -> Vec<ScatterPoint<'a>> {
    let points: Vec<ScatterPoint<'a>> = ctx
        .records()
        .iter()
        .filter_map(|rec| in_range(rec, range).map(|mass| (rec, mass)))
        .filter(|(rec, _)| selector.matches(&rec.launch_site))
        .map(|(rec, mass)| ScatterPoint {
            payload_mass_kg: mass,
            mission_outcome: rec.mission_outcome.as_str(),
            launch_site: rec.launch_site.as_str(),
        })
        .collect();

    log::debug!(
        "scatter for {} in [{}, {}]: {} rows",
        selector.value(),
        range.low,
        range.high,
        points.len()
    );
    points
}

fn in_range(rec: &LaunchRecord, range: PayloadRange) -> Option<f64> {
    rec.payload_mass_kg.filter(|&mass| range.contains(mass))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchSite;

    fn record(site: &str, outcome: &str, mass: Option<f64>) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            mission_outcome: outcome.to_string(),
            payload_mass_kg: mass,
        }
    }

    /// Small table with one classified payload and no absent values.
    fn fixture() -> LaunchContext {
        LaunchContext::new(vec![
            record("CCAFS LC-40", "Success", Some(525.0)),
            record("CCAFS LC-40", "Failure (in flight)", Some(4700.0)),
            record("VAFB SLC-4E", "Success", Some(500.0)),
            record("KSC LC-39A", "Success", Some(f64::INFINITY)),
            record("CCAFS SLC-40", "Success (payload status unclear)", Some(9600.0)),
            record("KSC LC-39A", "Success", Some(2490.0)),
        ])
    }

    #[test]
    fn all_sites_groups_every_row_by_outcome() {
        let ctx = fixture();
        let shares = get_proportions(&ctx, &SiteSelector::All);
        let counts: Vec<(&str, usize)> = shares.iter().map(|s| (s.outcome, s.count)).collect();
        assert_eq!(
            counts,
            [
                ("Failure (in flight)", 1),
                ("Success", 4),
                ("Success (payload status unclear)", 1),
            ]
        );
        let total: f64 = shares.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_site_proportions_ignore_payload() {
        let ctx = fixture();
        let shares = get_proportions(&ctx, &SiteSelector::Site(LaunchSite::KscLc39a));
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].outcome, "Success");
        assert_eq!(shares[0].count, 2);
        assert_eq!(shares[0].fraction, 1.0);
    }

    #[test]
    fn proportions_count_rows_without_payload() {
        let ctx = LaunchContext::new(vec![
            record("CCAFS LC-40", "Success", None),
            record("CCAFS LC-40", "Failure", Some(10.0)),
        ]);
        let shares = get_proportions(&ctx, &SiteSelector::All);
        assert_eq!(shares.iter().map(|s| s.count).sum::<usize>(), 2);
    }

    #[test]
    fn empty_selection_gives_no_categories() {
        let ctx = LaunchContext::new(vec![record("KSC LC-39A", "Success", Some(1.0))]);
        assert!(get_proportions(&ctx, &SiteSelector::Site(LaunchSite::CcafsLc40)).is_empty());
        assert!(get_proportions(&ctx, &SiteSelector::parse("Nowhere")).is_empty());
    }

    #[test]
    fn full_bounds_with_all_returns_every_row_in_order() {
        let ctx = fixture();
        let range = ctx.bounds().unwrap().as_range();
        let points = get_scatter_rows(&ctx, &SiteSelector::All, range);
        let masses: Vec<f64> = points.iter().map(|p| p.payload_mass_kg).collect();
        let expected: Vec<f64> = ctx.records().iter().filter_map(|r| r.payload_mass_kg).collect();
        assert_eq!(points.len(), ctx.len());
        assert_eq!(masses, expected);
    }

    #[test]
    fn scatter_is_idempotent() {
        let ctx = fixture();
        let selector = SiteSelector::Site(LaunchSite::CcafsLc40);
        let range = PayloadRange::new(0.0, 5000.0);
        assert_eq!(
            get_scatter_rows(&ctx, &selector, range),
            get_scatter_rows(&ctx, &selector, range)
        );
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let ctx = LaunchContext::new(vec![
            record("CCAFS LC-40", "Success", Some(500.0)),
            record("CCAFS LC-40", "Success", Some(1000.0)),
            record("CCAFS LC-40", "Success", Some(1500.0)),
        ]);
        let points = get_scatter_rows(&ctx, &SiteSelector::All, PayloadRange::new(500.0, 1000.0));
        let masses: Vec<f64> = points.iter().map(|p| p.payload_mass_kg).collect();
        assert_eq!(masses, [500.0, 1000.0]);
    }

    #[test]
    fn site_and_range_combine() {
        let ctx = fixture();
        let points = get_scatter_rows(
            &ctx,
            &SiteSelector::parse("CCAFS LC-40"),
            PayloadRange::new(0.0, 10000.0),
        );
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.launch_site == "CCAFS LC-40"));
        assert_eq!(points[0].mission_outcome, "Success");
        assert_eq!(points[1].mission_outcome, "Failure (in flight)");
    }

    #[test]
    fn site_without_rows_in_range_is_empty() {
        let ctx = LaunchContext::new(vec![record("KSC LC-39A", "Success", Some(100.0))]);
        let points = get_scatter_rows(
            &ctx,
            &SiteSelector::parse("CCAFS LC-40"),
            PayloadRange::new(0.0, 10000.0),
        );
        assert!(points.is_empty());
    }

    #[test]
    fn infinity_follows_float_ordering() {
        let ctx = LaunchContext::new(vec![
            record("KSC LC-39A", "Success", Some(f64::INFINITY)),
            record("KSC LC-39A", "Success", Some(f64::NEG_INFINITY)),
            record("KSC LC-39A", "Success", Some(3.0)),
        ]);
        let finite = get_scatter_rows(&ctx, &SiteSelector::All, PayloadRange::new(0.0, 10000.0));
        assert_eq!(finite.len(), 1);

        let open_top = get_scatter_rows(&ctx, &SiteSelector::All, PayloadRange::new(0.0, f64::INFINITY));
        assert_eq!(open_top.len(), 2);

        let everything = get_scatter_rows(
            &ctx,
            &SiteSelector::All,
            PayloadRange::new(f64::NEG_INFINITY, f64::INFINITY),
        );
        assert_eq!(everything.len(), 3);
    }

    #[test]
    fn absent_masses_never_match() {
        let ctx = LaunchContext::new(vec![
            record("KSC LC-39A", "Success", None),
            record("KSC LC-39A", "Success", Some(3.0)),
        ]);
        let points = get_scatter_rows(
            &ctx,
            &SiteSelector::All,
            PayloadRange::new(f64::NEG_INFINITY, f64::INFINITY),
        );
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn unknown_selector_is_empty_not_an_error() {
        let ctx = fixture();
        let points = get_scatter_rows(
            &ctx,
            &SiteSelector::parse("Boca Chica"),
            PayloadRange::new(f64::NEG_INFINITY, f64::INFINITY),
        );
        assert!(points.is_empty());
    }
}
