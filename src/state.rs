use crate::color::OutcomeColors;
use crate::config::DashboardConfig;
use crate::data::filter::{get_proportions, get_scatter_rows, OutcomeShare, ScatterPoint};
use crate::data::model::{LaunchContext, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The dashboard state, independent of rendering.
///
/// The launch context is owned here but never handed out mutably; only the
/// selection (site and payload range) changes between frames.
pub struct AppState {
    ctx: LaunchContext,
    pub config: DashboardConfig,
    pub colors: OutcomeColors,

    /// Current drop-down value: `ALL` or a site name.
    pub site: String,

    /// Current payload range. Starts at the dataset's bounds, which may be
    /// infinite until the user moves a slider.
    pub range: PayloadRange,
}

impl AppState {
    pub fn new(ctx: LaunchContext, config: DashboardConfig) -> Self {
        let colors = OutcomeColors::new(ctx.records().iter().map(|r| r.mission_outcome.as_str()));
        let range = ctx
            .bounds()
            .map(|b| b.as_range())
            .unwrap_or_else(|| PayloadRange::new(config.slider_min, config.slider_max));
        Self {
            ctx,
            config,
            colors,
            site: SiteSelector::ALL_SENTINEL.to_string(),
            range,
        }
    }

    pub fn context(&self) -> &LaunchContext {
        &self.ctx
    }

    pub fn select_site(&mut self, value: &str) {
        log::debug!("site selected: {value}");
        self.site = value.to_string();
    }

    /// The drop-down value as a selector. Values outside the known sites
    /// select nothing.
    pub fn selector(&self) -> SiteSelector {
        SiteSelector::parse(&self.site)
    }

    /// Move the lower slider handle; pushes the upper one along if crossed.
    pub fn set_range_low(&mut self, low: f64) {
        self.range.low = low;
        if self.range.high < low {
            self.range.high = low;
        }
    }

    /// Move the upper slider handle; pushes the lower one along if crossed.
    pub fn set_range_high(&mut self, high: f64) {
        self.range.high = high;
        if self.range.low > high {
            self.range.low = high;
        }
    }

    pub fn proportions(&self) -> Vec<OutcomeShare<'_>> {
        get_proportions(&self.ctx, &self.selector())
    }

    pub fn scatter(&self) -> Vec<ScatterPoint<'_>> {
        get_scatter_rows(&self.ctx, &self.selector(), self.range)
    }

    pub fn proportion_title(&self) -> String {
        match self.selector() {
            SiteSelector::All => "Success Rate for All Launch Sites".to_string(),
            site => format!("Total Success Launches for Site: {}", site.value()),
        }
    }

    pub fn scatter_title(&self) -> String {
        format!("Launch Outcomes for: {}", self.selector())
    }
}
