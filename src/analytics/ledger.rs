//! Ledger aggregation for the finance dashboard.
//!
//! All totals report expenses as positive magnitudes regardless of how the
//! entries were stored.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{Category, DateRange, EntryType, LedgerEntry, LedgerFilter, OpenItem};
use crate::providers::LedgerProvider;

/// Income and expenses over a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Sum of income entries.
    pub income: Decimal,
    /// Sum of expense magnitudes.
    pub expenses: Decimal,
}

impl PeriodTotals {
    /// `income - expenses`.
    pub fn net_income(&self) -> Decimal {
        self.income - self.expenses
    }

    fn from_entries(entries: &[LedgerEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut totals, entry| {
            match entry.entry_type {
                EntryType::Income => totals.income += entry.signed_amount(),
                EntryType::Expense => totals.expenses += entry.magnitude(),
            }
            totals
        })
    }
}

/// Monthly total for one (category, entry type) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Ledger category.
    pub category: Category,
    /// Income or expense.
    pub entry_type: EntryType,
    /// Income sum, or expense magnitude sum.
    pub total: Decimal,
}

/// Count and outstanding amount of open items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingBucket {
    /// Number of items.
    pub count: usize,
    /// Sum of outstanding balances.
    pub amount: Decimal,
}

impl AgingBucket {
    fn add(&mut self, outstanding: Decimal) {
        self.count += 1;
        self.amount += outstanding;
    }
}

/// Receivables or payables split by due date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingSummary {
    /// Outstanding items due strictly before the reference date.
    pub overdue: AgingBucket,
    /// Other outstanding items.
    pub pending: AgingBucket,
}

impl AgingSummary {
    /// Buckets items by outstanding balance and due date.
    ///
    /// Fully settled items are left out of both buckets.
    pub fn from_items(items: &[OpenItem], reference: NaiveDate) -> Self {
        let mut summary = Self::default();
        for item in items {
            let outstanding = item.outstanding();
            if outstanding <= Decimal::ZERO {
                continue;
            }
            if item.due_date < reference {
                summary.overdue.add(outstanding);
            } else {
                summary.pending.add(outstanding);
            }
        }
        summary
    }

    /// Outstanding across both buckets.
    pub fn total_outstanding(&self) -> Decimal {
        self.overdue.amount + self.pending.amount
    }
}

/// Everything the finance dashboard shows for a reference instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// The instant the summary was computed for.
    pub reference: NaiveDateTime,
    /// Totals for the reference day.
    pub daily: PeriodTotals,
    /// Totals for the reference month.
    pub monthly: PeriodTotals,
    /// Monthly totals per category and entry type.
    pub categories: Vec<CategoryTotal>,
    /// Receivable aging.
    pub receivables: AgingSummary,
    /// Payable aging.
    pub payables: AgingSummary,
}

/// Read-only aggregation over a ledger snapshot.
pub struct LedgerAggregator<'a> {
    ledger: &'a dyn LedgerProvider,
}

impl<'a> LedgerAggregator<'a> {
    /// Creates an aggregator over a ledger.
    pub fn new(ledger: &'a dyn LedgerProvider) -> Self {
        Self { ledger }
    }

    /// Income and expenses on the reference day.
    pub fn daily_totals(&self, reference: NaiveDateTime) -> EngineResult<PeriodTotals> {
        let entries = self
            .ledger
            .query_ledger(DateRange::for_day(reference.date()), LedgerFilter::all())?;
        Ok(PeriodTotals::from_entries(&entries))
    }

    /// Income and expenses in the reference month.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::analytics::LedgerAggregator;
    /// use payroll_engine::models::{Category, EntryType, LedgerEntry};
    /// use payroll_engine::providers::LedgerSnapshot;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let (income, expense) = (Decimal::new(1000, 0), Decimal::new(-400, 0));
    /// let ledger = LedgerSnapshot::new(vec![
    ///     LedgerEntry::new(day, income, EntryType::Income, Category::Sales, "sale"),
    ///     LedgerEntry::new(day, expense, EntryType::Expense, Category::Supplies, "paper"),
    /// ]);
    ///
    /// let totals = LedgerAggregator::new(&ledger).monthly_totals(day).unwrap();
    /// assert_eq!(totals.income, Decimal::new(1000, 0));
    /// assert_eq!(totals.expenses, Decimal::new(400, 0));
    /// assert_eq!(totals.net_income(), Decimal::new(600, 0));
    /// ```
    pub fn monthly_totals(&self, reference: NaiveDateTime) -> EngineResult<PeriodTotals> {
        let entries = self.monthly_entries(reference)?;
        Ok(PeriodTotals::from_entries(&entries))
    }

    /// Monthly totals grouped by category and entry type, in category order.
    pub fn category_totals(&self, reference: NaiveDateTime) -> EngineResult<Vec<CategoryTotal>> {
        let entries = self.monthly_entries(reference)?;
        Ok(group_by_category(&entries))
    }

    /// Receivable aging at the reference date.
    pub fn receivables_aging(&self, reference: NaiveDateTime) -> EngineResult<AgingSummary> {
        let items = self.ledger.list_receivables()?;
        Ok(AgingSummary::from_items(&items, reference.date()))
    }

    /// Payable aging at the reference date.
    pub fn payables_aging(&self, reference: NaiveDateTime) -> EngineResult<AgingSummary> {
        let items = self.ledger.list_payables()?;
        Ok(AgingSummary::from_items(&items, reference.date()))
    }

    /// The full dashboard for the reference instant.
    pub fn summary(&self, reference: NaiveDateTime) -> EngineResult<LedgerSummary> {
        let monthly_entries = self.monthly_entries(reference)?;

        let summary = LedgerSummary {
            reference,
            daily: self.daily_totals(reference)?,
            monthly: PeriodTotals::from_entries(&monthly_entries),
            categories: group_by_category(&monthly_entries),
            receivables: self.receivables_aging(reference)?,
            payables: self.payables_aging(reference)?,
        };

        debug!(
            reference = %reference,
            monthly_income = %summary.monthly.income,
            monthly_expenses = %summary.monthly.expenses,
            overdue_receivables = summary.receivables.overdue.count,
            overdue_payables = summary.payables.overdue.count,
            "Ledger summary computed"
        );

        Ok(summary)
    }

    fn monthly_entries(&self, reference: NaiveDateTime) -> EngineResult<Vec<LedgerEntry>> {
        self.ledger
            .query_ledger(DateRange::for_month(reference.date()), LedgerFilter::all())
    }
}

fn group_by_category(entries: &[LedgerEntry]) -> Vec<CategoryTotal> {
    let mut grouped: BTreeMap<(Category, EntryType), Decimal> = BTreeMap::new();
    for entry in entries {
        let amount = match entry.entry_type {
            EntryType::Income => entry.signed_amount(),
            EntryType::Expense => entry.magnitude(),
        };
        *grouped.entry((entry.category, entry.entry_type)).or_default() += amount;
    }

    grouped
        .into_iter()
        .map(|((category, entry_type), total)| CategoryTotal {
            category,
            entry_type,
            total,
        })
        .collect()
}
