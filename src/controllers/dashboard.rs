//! Dashboard Controller
//!
//! Loads the balance, the sleep chart and the good-things feed. Each section
//! is fetched on its own; one failing never blocks the others.

use std::cell::RefCell;
use std::fmt;

use crate::api::{ClientError, ClientResult, RewardsApi};
use crate::feed::{normalize_others, normalize_own, DisplayEntry, OwnRow};
use crate::sleep::{self, ChartPoint};

/// Everything the dashboard renders
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    pub balance: Option<f64>,
    pub chart: Vec<ChartPoint>,
    pub mine: Vec<OwnRow>,
    pub others: Vec<DisplayEntry>,
    /// Set once the feed has been fetched, so empty states can be told from loading
    pub feed_loaded: bool,
}

/// Independently loaded part of the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Balance,
    Chart,
    Feed,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Balance => "balance",
            Section::Chart => "sleep chart",
            Section::Feed => "good things",
        };
        f.write_str(name)
    }
}

/// Sections that failed during [`DashboardController::boot`]
#[derive(Debug, Default)]
pub struct BootReport {
    pub failures: Vec<(Section, ClientError)>,
}

impl BootReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    fn record<T>(&mut self, section: Section, result: ClientResult<T>) {
        if let Err(e) = result {
            tracing::error!(%section, error = %e, "Failed to load section");
            self.failures.push((section, e));
        }
    }
}

pub struct DashboardController<B: RewardsApi> {
    backend: B,
    others_limit: u32,
    state: RefCell<DashboardState>,
}

impl<B: RewardsApi> DashboardController<B> {
    pub fn new(backend: B, others_limit: u32) -> Self {
        Self {
            backend,
            others_limit,
            state: RefCell::new(DashboardState::default()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub async fn refresh_balance(&self) -> ClientResult<f64> {
        let me = self.backend.me().await?;
        self.state.borrow_mut().balance = Some(me.points);
        Ok(me.points)
    }

    /// Fetch sessions and rebuild the chart series; returns the number of points.
    pub async fn refresh_chart(&self) -> ClientResult<usize> {
        let sessions = self.backend.sessions().await?;
        let points = sleep::normalize(&sessions);
        let count = points.len();

        tracing::debug!(sessions = sessions.len(), points = count, "Sleep chart refreshed");
        self.state.borrow_mut().chart = points;
        Ok(count)
    }

    /// Fetch both feed lists. Also used by the reload-others action.
    pub async fn refresh_feed(&self) -> ClientResult<()> {
        let mut response = self.backend.good_things(self.others_limit).await?;
        let mine = normalize_own(&response.mine);
        let others = normalize_others(response.others());

        let mut state = self.state.borrow_mut();
        state.mine = mine;
        state.others = others;
        state.feed_loaded = true;
        Ok(())
    }

    /// Initial load: balance, chart, then feed, each regardless of earlier failures.
    pub async fn boot(&self) -> BootReport {
        let mut report = BootReport::default();
        report.record(Section::Balance, self.refresh_balance().await);
        report.record(Section::Chart, self.refresh_chart().await);
        report.record(Section::Feed, self.refresh_feed().await);
        report
    }
}
