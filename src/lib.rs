//! Payroll Computation and Financial Analytics Engine
//!
//! This crate turns monthly attendance, approved leave and approved overtime
//! into pay slips, generates at most one active payroll per calendar month,
//! aggregates a business ledger for a finance dashboard, and tests whether
//! high- and low-revenue months differ significantly.
//!
//! All inputs arrive through the traits in [`providers`]; the only write is
//! the atomic payroll commit.

#![warn(missing_docs)]

pub mod analytics;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
