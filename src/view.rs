//! ViewStateMachine: which logical page is active, and that page's filters.
//!
//! The active page is derived from two monotonically increasing navigation
//! counters, not from the most recent click: Detail wins only while its
//! counter is strictly ahead. Equal counters resolve to Home, and a faster
//! Home clicker can hold the view on Home indefinitely. That comparison rule
//! is the product behavior and is kept as is.

use crate::models::FilterCriteria;
use serde::{Deserialize, Serialize};

/// Logical page of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Home,
    Detail,
}

/// Counts of navigation clicks, tracked by the UI layer and passed in with
/// every recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavCounters {
    pub detail_clicks: u64,
    pub home_clicks: u64,
}

impl NavCounters {
    pub fn new(detail_clicks: u64, home_clicks: u64) -> Self {
        Self {
            detail_clicks,
            home_clicks,
        }
    }

    /// A "show detail" navigation click.
    pub fn record_detail(&mut self) {
        self.detail_clicks += 1;
    }

    /// A "show home" navigation click.
    pub fn record_home(&mut self) {
        self.home_clicks += 1;
    }

    /// Detail iff strictly more detail clicks than home clicks.
    pub fn active_page(&self) -> Page {
        if self.detail_clicks > self.home_clicks {
            Page::Detail
        } else {
            Page::Home
        }
    }
}

/// Independent filter selections, one per page. The engine recomputes with
/// whichever belongs to the active page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageFilters {
    pub home: FilterCriteria,
    pub detail: FilterCriteria,
}

impl PageFilters {
    pub fn for_page(&self, page: Page) -> &FilterCriteria {
        match page {
            Page::Home => &self.home,
            Page::Detail => &self.detail,
        }
    }
}
