//! Revenue seasonality analysis.
//!
//! Builds a monthly Sales/Income series over a trailing window, splits the
//! months into a high-revenue and a low-revenue group, and runs Welch's
//! t-test to judge whether the two groups differ significantly.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{AnalyticsConfig, MIN_GROUPABLE_POINTS};
use crate::error::EngineResult;
use crate::models::{Category, DateRange, EntryType, LedgerFilter, first_of_month};
use crate::providers::LedgerProvider;

use super::welch::{Distribution, WelchTTest, calculate_distribution, welch_t_test};

/// Sales income for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRevenuePoint {
    /// First day of the month.
    pub month: NaiveDate,
    /// Sum of Sales/Income entries in the month.
    pub total: Decimal,
}

impl MonthlyRevenuePoint {
    fn total_f64(&self) -> f64 {
        self.total.to_f64().unwrap_or_default()
    }
}

/// Group statistics and the test comparing them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueStatistics {
    /// Distribution of the high-revenue months.
    pub high: Distribution,
    /// Distribution of the low-revenue months.
    pub low: Distribution,
    /// Welch's test of high against low.
    pub test: WelchTTest,
}

/// Outcome of a revenue analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueAnalysis {
    /// Months with at least one Sales/Income entry, oldest first.
    pub series: Vec<MonthlyRevenuePoint>,
    /// Top months by total, highest first.
    pub high_months: Vec<MonthlyRevenuePoint>,
    /// Bottom months by total, highest first.
    pub low_months: Vec<MonthlyRevenuePoint>,
    /// Present only when there was enough data.
    pub statistics: Option<RevenueStatistics>,
    /// Whether the series had enough points to compare groups.
    pub has_enough_data: bool,
}

impl RevenueAnalysis {
    /// Welch t statistic, if computed.
    pub fn t_statistic(&self) -> Option<f64> {
        self.statistics.map(|s| s.test.t_statistic)
    }

    /// Two-tailed p-value, if computed.
    pub fn p_value(&self) -> Option<f64> {
        self.statistics.map(|s| s.test.p_value)
    }

    /// Whether high and low months differ at significance level `alpha`.
    ///
    /// False when there was not enough data or the p-value is NaN.
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value().is_some_and(|p| p < alpha)
    }
}

/// Analyzes monthly sales revenue from a ledger snapshot.
pub struct RevenueAnalyzer<'a> {
    ledger: &'a dyn LedgerProvider,
    config: &'a AnalyticsConfig,
}

impl<'a> RevenueAnalyzer<'a> {
    /// Creates an analyzer over a ledger.
    pub fn new(ledger: &'a dyn LedgerProvider, config: &'a AnalyticsConfig) -> Self {
        Self { ledger, config }
    }

    /// Analyzes the configured number of trailing months ending with
    /// `reference`'s month.
    pub fn analyze(&self, reference: NaiveDate) -> EngineResult<RevenueAnalysis> {
        self.analyze_months(reference, self.config.months_back)
    }

    /// Analyzes `months_back` trailing months ending with `reference`'s
    /// month, which is included even if partial.
    ///
    /// Too few monthly points is not an error: the result carries the raw
    /// series with `has_enough_data = false`.
    pub fn analyze_months(
        &self,
        reference: NaiveDate,
        months_back: u32,
    ) -> EngineResult<RevenueAnalysis> {
        let range = DateRange::trailing_months(reference, months_back.max(1));
        let entries = self
            .ledger
            .query_ledger(range, LedgerFilter::of(Category::Sales, EntryType::Income))?;

        let mut by_month: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for entry in &entries {
            *by_month
                .entry(first_of_month(entry.transaction_date.date()))
                .or_default() += entry.signed_amount();
        }

        let series: Vec<MonthlyRevenuePoint> = by_month
            .into_iter()
            .map(|(month, total)| MonthlyRevenuePoint { month, total })
            .collect();

        let required = self.config.min_data_points.max(MIN_GROUPABLE_POINTS);
        if series.len() < required {
            info!(
                reference = %reference,
                months_back,
                points = series.len(),
                "Not enough monthly revenue points for analysis"
            );
            return Ok(RevenueAnalysis {
                series,
                high_months: Vec::new(),
                low_months: Vec::new(),
                statistics: None,
                has_enough_data: false,
            });
        }

        let mut ranked = series.clone();
        ranked.sort_by(|a, b| b.total.cmp(&a.total));

        let group_size = (ranked.len() / 4).max(2);
        let high_months = ranked[..group_size].to_vec();
        let low_months = ranked[ranked.len() - group_size..].to_vec();

        let high = calculate_distribution(&totals(&high_months));
        let low = calculate_distribution(&totals(&low_months));
        let test = welch_t_test(&high, &low);

        info!(
            reference = %reference,
            months_back,
            points = series.len(),
            group_size,
            t_statistic = test.t_statistic,
            p_value = test.p_value,
            "Revenue analysis complete"
        );

        Ok(RevenueAnalysis {
            series,
            high_months,
            low_months,
            statistics: Some(RevenueStatistics { high, low, test }),
            has_enough_data: true,
        })
    }
}

fn totals(points: &[MonthlyRevenuePoint]) -> Vec<f64> {
    points.iter().map(MonthlyRevenuePoint::total_f64).collect()
}
