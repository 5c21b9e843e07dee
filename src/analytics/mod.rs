//! Financial analytics.
//!
//! Ledger aggregation for the finance dashboard, and revenue seasonality
//! analysis built on Welch's t-test with a self-contained Student's t
//! distribution.

mod ledger;
mod log_gamma;
mod revenue;
pub mod student_t;
mod welch;

pub use ledger::{
    AgingBucket, AgingSummary, CategoryTotal, LedgerAggregator, LedgerSummary, PeriodTotals,
};
pub use log_gamma::ln_gamma;
pub use revenue::{MonthlyRevenuePoint, RevenueAnalysis, RevenueAnalyzer, RevenueStatistics};
pub use welch::{Distribution, WelchTTest, calculate_distribution, welch_t_test};
