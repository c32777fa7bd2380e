//! Pool records and display ranking

pub mod ranking;

pub use ranking::{
    one_year_fl, PoolListView, PoolRecord, PoolSorter, PoolStats, SortColumn, DEFAULT_PAGE_SIZE,
    UNITY_AMP,
};
