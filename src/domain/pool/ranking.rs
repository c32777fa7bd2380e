//! Pool-list ranking
//!
//! Orders pool records for display: a default ranking (unity-amp pools
//! first, then health factor) plus four sortable columns with
//! direction toggling, and load-more pagination over the sorted
//! sequence.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// On-chain representation of amplification factor 1 (values are
/// scaled by 10^4)
pub const UNITY_AMP: u64 = 10000;

/// Market stats a pool is annotated with, as reported by the subgraph.
/// Tracked USD figures may be missing; untracked variants stand in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolStats {
    #[serde(rename = "reserveUSD")]
    pub reserve_usd: f64,
    #[serde(rename = "oneDayVolumeUSD")]
    pub one_day_volume_usd: Option<f64>,
    #[serde(rename = "oneDayVolumeUntracked")]
    pub one_day_volume_untracked: Option<f64>,
    #[serde(rename = "oneDayFeeUSD")]
    pub one_day_fee_usd: Option<f64>,
    #[serde(rename = "oneDayFeeUntracked")]
    pub one_day_fee_untracked: Option<f64>,
}

impl PoolStats {
    /// Daily volume with the untracked fallback; absent figures count as 0
    pub fn one_day_volume(&self) -> f64 {
        self.one_day_volume_usd
            .or(self.one_day_volume_untracked)
            .unwrap_or(0.0)
    }

    /// Daily fee with the untracked fallback
    pub fn one_day_fee(&self) -> Option<f64> {
        self.one_day_fee_usd.or(self.one_day_fee_untracked)
    }
}

/// A liquidity pool plus its display annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolRecord {
    pub address: String,
    /// Scaled amplification factor; `UNITY_AMP` means amp = 1
    pub amp: u64,
    /// Externally computed pool quality score
    #[serde(rename = "healthFactor")]
    pub health_factor: f64,
    pub stats: PoolStats,
}

impl PoolRecord {
    /// Annualized fee over liquidity, in percent. Zero liquidity or a
    /// missing fee figure yields 0 rather than a division fault.
    pub fn one_year_fee_liquidity(&self) -> f64 {
        one_year_fl(self.stats.reserve_usd, self.stats.one_day_fee())
    }
}

/// `(dailyFee * 365 * 100) / liquidity`, guarded
pub fn one_year_fl(liquidity: f64, fee_one_day: Option<f64>) -> f64 {
    match fee_one_day {
        Some(fee) if liquidity != 0.0 => (fee * 365.0 * 100.0) / liquidity,
        _ => 0.0,
    }
}

/// Columns the list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Liquidity,
    Volume,
    Fees,
    OneYearFeeLiquidity,
}

/// Current sort selection: no column means the default ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSorter {
    column: Option<SortColumn>,
    descending: bool,
}

impl PoolSorter {
    /// Default ranking, no column selected
    pub fn new() -> Self {
        Self { column: None, descending: true }
    }

    pub fn column(&self) -> Option<SortColumn> {
        self.column
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    /// Column-click behavior: a new column starts descending, clicking
    /// the active column flips the direction.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == Some(column) {
            self.descending = !self.descending;
        } else {
            self.column = Some(column);
            self.descending = true;
        }
    }

    /// Sort key for a column. NaN keys compare as ties.
    fn key(column: SortColumn, pool: &PoolRecord) -> f64 {
        match column {
            SortColumn::Liquidity => pool.stats.reserve_usd,
            SortColumn::Volume => pool.stats.one_day_volume(),
            SortColumn::Fees => pool.stats.one_day_fee().unwrap_or(0.0),
            SortColumn::OneYearFeeLiquidity => pool.one_year_fee_liquidity(),
        }
    }

    /// Comparator over nullable pool entries. Null sorts last in every
    /// ordering; the rest follows the selected column or the default
    /// ranking.
    pub fn compare(&self, a: Option<&PoolRecord>, b: Option<&PoolRecord>) -> Ordering {
        let (a, b) = match (a, b) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Greater,
            (Some(_), None) => return Ordering::Less,
            (Some(a), Some(b)) => (a, b),
        };

        match self.column {
            None => default_order(a, b),
            Some(column) => {
                let ord = Self::key(column, a)
                    .partial_cmp(&Self::key(column, b))
                    .unwrap_or(Ordering::Equal);
                if self.descending {
                    ord.reverse()
                } else {
                    ord
                }
            }
        }
    }

    /// Stable-sort a list of nullable pool entries in place
    pub fn sort(&self, pools: &mut [Option<PoolRecord>]) {
        pools.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }
}

impl Default for PoolSorter {
    fn default() -> Self {
        Self::new()
    }
}

/// Default display ranking: unity-amp pools first, then health factor
/// descending. Equal health is a tie.
fn default_order(a: &PoolRecord, b: &PoolRecord) -> Ordering {
    match (a.amp == UNITY_AMP, b.amp == UNITY_AMP) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => b
            .health_factor
            .partial_cmp(&a.health_factor)
            .unwrap_or(Ordering::Equal),
    }
}

/// Paged view over a pool set: sorted sequence, first `page * page_size`
/// rows visible.
#[derive(Debug, Clone)]
pub struct PoolListView {
    pools: Vec<Option<PoolRecord>>,
    sorter: PoolSorter,
    page: usize,
    page_size: usize,
}

pub const DEFAULT_PAGE_SIZE: usize = 10;

impl PoolListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            pools: Vec::new(),
            sorter: PoolSorter::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replace the underlying pool set; the page resets to 1
    pub fn set_pools(&mut self, pools: Vec<Option<PoolRecord>>) {
        self.pools = pools;
        self.page = 1;
    }

    pub fn toggle_column(&mut self, column: SortColumn) {
        self.sorter.toggle(column);
    }

    pub fn sorter(&self) -> &PoolSorter {
        &self.sorter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Last page that still adds rows
    pub fn max_page(&self) -> usize {
        self.pools.len().div_ceil(self.page_size).max(1)
    }

    pub fn load_more(&mut self) {
        if self.page < self.max_page() {
            self.page += 1;
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.max_page()
    }

    /// First `page * page_size` entries of the sorted sequence, null
    /// entries elided
    pub fn visible(&self) -> Vec<PoolRecord> {
        let mut sorted = self.pools.clone();
        self.sorter.sort(&mut sorted);
        sorted
            .into_iter()
            .take(self.page * self.page_size)
            .flatten()
            .collect()
    }
}
