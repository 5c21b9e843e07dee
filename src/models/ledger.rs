//! Ledger entries, receivables and payables.
//!
//! Ledger amounts reach the engine with either sign convention: some
//! writers store expenses as negative amounts, others store the magnitude
//! and rely on the entry type. [`LedgerEntry::signed_amount`] and
//! [`LedgerEntry::magnitude`] are the only accessors the aggregation code
//! uses, so the two conventions produce identical totals.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Money in.
    Income,
    /// Money out.
    Expense,
}

/// Business category of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Revenue from sales.
    Sales,
    /// Salaries and wages.
    Payroll,
    /// Consumables and materials.
    Supplies,
    /// Rent, utilities and running costs.
    Operations,
    /// Anything else.
    Other,
}

/// A posted ledger transaction.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Category, EntryType, LedgerEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entry = LedgerEntry::new(
///     NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(10, 0, 0).unwrap(),
///     Decimal::new(-400, 0),
///     EntryType::Expense,
///     Category::Supplies,
///     "Printer paper",
/// );
/// assert_eq!(entry.magnitude(), Decimal::new(400, 0));
/// assert_eq!(entry.signed_amount(), Decimal::new(-400, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// When the transaction happened.
    pub transaction_date: NaiveDateTime,
    /// Amount as stored; see [`LedgerEntry::signed_amount`].
    pub amount: Decimal,
    /// Direction of the entry.
    pub entry_type: EntryType,
    /// Business category.
    pub category: Category,
    /// Free-text description.
    pub description: String,
}

impl LedgerEntry {
    /// Creates an entry with a fresh id.
    pub fn new(
        transaction_date: NaiveDateTime,
        amount: Decimal,
        entry_type: EntryType,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_date,
            amount,
            entry_type,
            category,
            description: description.into(),
        }
    }

    /// Absolute value of the stored amount.
    pub fn magnitude(&self) -> Decimal {
        self.amount.abs()
    }

    /// Amount signed by entry type: income positive, expense negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Income => self.magnitude(),
            EntryType::Expense => -self.magnitude(),
        }
    }
}

/// Optional category/type restriction for ledger queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerFilter {
    /// Keep only this category.
    pub category: Option<Category>,
    /// Keep only this entry type.
    pub entry_type: Option<EntryType>,
}

impl LedgerFilter {
    /// A filter that keeps every entry.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to a category and entry type.
    pub fn of(category: Category, entry_type: EntryType) -> Self {
        Self {
            category: Some(category),
            entry_type: Some(entry_type),
        }
    }

    /// Checks an entry against the filter.
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        self.category.is_none_or(|c| c == entry.category)
            && self.entry_type.is_none_or(|t| t == entry.entry_type)
    }
}

/// Whether an open item is owed to us or by us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenItemKind {
    /// An invoice a customer owes us; settled by income entries.
    Receivable,
    /// A bill we owe a supplier; settled by expense entries.
    Payable,
}

impl OpenItemKind {
    /// The entry type that settles this kind of item.
    pub fn settling_entry_type(&self) -> EntryType {
        match self {
            OpenItemKind::Receivable => EntryType::Income,
            OpenItemKind::Payable => EntryType::Expense,
        }
    }
}

/// An invoice or bill with its settling ledger entries preloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenItem {
    /// Invoice or bill number.
    pub id: String,
    /// Receivable or payable.
    pub kind: OpenItemKind,
    /// Customer or supplier name.
    pub counterparty: String,
    /// Face amount of the invoice or bill.
    pub face_amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Ledger entries posted against this item.
    #[serde(default)]
    pub linked_entries: Vec<LedgerEntry>,
}

impl OpenItem {
    /// Amount collected (receivable) or paid (payable) so far.
    pub fn settled_amount(&self) -> Decimal {
        let settling = self.kind.settling_entry_type();
        self.linked_entries
            .iter()
            .filter(|e| e.entry_type == settling)
            .map(LedgerEntry::magnitude)
            .sum()
    }

    /// Face amount less settlements, never below zero.
    pub fn outstanding(&self) -> Decimal {
        (self.face_amount - self.settled_amount()).max(Decimal::ZERO)
    }
}
