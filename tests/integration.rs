//! Integration tests for the payroll and analytics engine.
//!
//! This test suite drives the public API end to end through the in-memory
//! providers and the shipped default configuration:
//! - Configuration loading and validation
//! - Payroll generation scenarios
//! - One active payroll per month
//! - Ledger aggregation
//! - Revenue analysis

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;

use payroll_engine::analytics::{
    LedgerAggregator, RevenueAnalyzer, calculate_distribution, student_t,
};
use payroll_engine::calculation::{
    GenerateOutcome, MonthLocks, PayrollGenerator, PayrollSources,
};
use payroll_engine::config::{ConfigLoader, EngineConfig, PayrollConfig};
use payroll_engine::error::EngineError;
use payroll_engine::models::{
    AttendanceRecord, Category, EntryType, Employee, LeaveRecord, LeaveStatus, LedgerEntry,
    OpenItem, OpenItemKind, OvertimeRequest, OvertimeStatus, PayrollStatus,
};
use payroll_engine::providers::{
    InMemoryPayrollStore, LedgerSnapshot, PayrollSnapshot, PayrollStore,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/default").expect("Failed to load config")
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
}

fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
}

fn employee(id: &str, role: &str) -> Employee {
    Employee {
        id: id.to_string(),
        name: id.to_string(),
        roles: vec![role.to_string()],
        basic_salary: None,
    }
}

/// One 08:00-17:00 attendance record per day for `days` days from `first`.
fn daily_attendance(employee_id: &str, first: &str, days: i64) -> Vec<AttendanceRecord> {
    let first = date(first);
    (0..days)
        .map(|offset| {
            let day = first + Duration::days(offset);
            AttendanceRecord {
                employee_id: employee_id.to_string(),
                check_in: day.and_time(time("08:00:00")),
                check_out: Some(day.and_time(time("17:00:00"))),
            }
        })
        .collect()
}

fn approved_overtime(employee_id: &str, day: &str, start: &str, end: &str) -> OvertimeRequest {
    OvertimeRequest {
        employee_id: employee_id.to_string(),
        date: date(day),
        start_time: time(start),
        end_time: time(end),
        status: OvertimeStatus::Approved,
    }
}

fn generate(
    snapshot: &PayrollSnapshot,
    store: &InMemoryPayrollStore,
    config: &PayrollConfig,
    month: &str,
) -> GenerateOutcome {
    PayrollGenerator::new(PayrollSources::uniform(snapshot), store, config)
        .generate(date(month))
        .expect("Payroll generation failed")
}

fn assert_money(actual: Decimal, expected: &str, what: &str) {
    assert_eq!(
        actual.round_dp(2),
        decimal(expected),
        "Expected {} {}, got {}",
        what,
        expected,
        actual.round_dp(2)
    );
}

fn sale(when: &str, amount: &str) -> LedgerEntry {
    LedgerEntry::new(at(when), decimal(amount), EntryType::Income, Category::Sales, "sale")
}

// =============================================================================
// SECTION 1: Configuration
// =============================================================================

#[test]
fn test_default_config_matches_builtin_defaults() {
    let loader = load_config();
    assert_eq!(loader.config(), &EngineConfig::default());
    assert_eq!(loader.payroll().basic_salary, decimal("20000"));
    assert_eq!(loader.payroll().overtime.threshold, time("18:00:00"));
    assert_eq!(loader.payroll().statutory.total(), decimal("1600"));
    assert_eq!(loader.analytics().months_back, 12);
}

#[test]
fn test_missing_config_directory() {
    let result = ConfigLoader::load("./config/does-not-exist");
    assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = EngineConfig::default();
    let mut payroll = config.payroll().clone();
    payroll.hours_per_day = Decimal::ZERO;
    config = EngineConfig::new(payroll, config.analytics().clone());

    let result = ConfigLoader::from_config(config);
    assert!(matches!(
        result,
        Err(EngineError::InvalidConfig { ref field, .. }) if field == "hours_per_day"
    ));
}

// =============================================================================
// SECTION 2: Payroll Generation
// =============================================================================

#[test]
fn test_overtime_scenario_end_to_end() {
    // 20000 basic, 30-day month, no absences, overtime 17:00-20:00 approved,
    // checked out at 19:30
    let loader = load_config();
    let mut attendance = daily_attendance("emp_001", "2024-06-01", 30);
    attendance[9].check_out = Some(at("2024-06-10T19:30:00"));

    let snapshot = PayrollSnapshot::new(vec![employee("emp_001", "User")])
        .with_attendance(attendance)
        .with_overtime(vec![approved_overtime("emp_001", "2024-06-10", "17:00:00", "20:00:00")]);
    let store = InMemoryPayrollStore::new();

    let outcome = generate(&snapshot, &store, loader.payroll(), "2024-06-15");
    let payroll = outcome.payroll().expect("Expected a generated payroll");
    let slip = payroll.slip_for("emp_001").unwrap();

    assert_eq!(payroll.status, PayrollStatus::PendingApproval);
    assert_eq!(slip.days_absent, 0);
    assert_money(slip.overtime_penalty, "41.67", "overtime_penalty");
    assert_money(slip.overtime_pay, "156.25", "overtime_pay");
    assert_money(slip.gross_pay, "20156.25", "gross_pay");
    assert_money(slip.total_deductions, "1641.67", "total_deductions");
    assert_money(slip.net_pay, "18514.58", "net_pay");
}

#[test]
fn test_leave_counts_toward_presence() {
    let loader = load_config();
    let snapshot = PayrollSnapshot::new(vec![employee("emp_001", "User")])
        .with_attendance(daily_attendance("emp_001", "2024-02-01", 25))
        .with_leave(vec![
            LeaveRecord {
                employee_id: "emp_001".to_string(),
                status: LeaveStatus::Approved,
                start_date: date("2024-02-26"),
                end_date: date("2024-02-28"),
            },
            LeaveRecord {
                employee_id: "emp_001".to_string(),
                status: LeaveStatus::Denied,
                start_date: date("2024-02-29"),
                end_date: date("2024-02-29"),
            },
        ]);
    let store = InMemoryPayrollStore::new();

    let outcome = generate(&snapshot, &store, loader.payroll(), "2024-02-01");
    let slip = outcome.payroll().unwrap().slip_for("emp_001").unwrap().clone();

    // 29 days in February 2024; 25 attendance + 1 approved leave record
    assert_eq!(slip.days_absent, 3);
    assert_money(slip.absent_deductions, "2068.97", "absent_deductions");
}

#[test]
fn test_only_users_are_paid() {
    let loader = load_config();
    let snapshot = PayrollSnapshot::new(vec![
        employee("emp_001", "User"),
        employee("adm_001", "Admin"),
        Employee {
            roles: vec!["Admin".to_string(), "User".to_string()],
            ..employee("mgr_001", "Admin")
        },
    ]);
    let store = InMemoryPayrollStore::new();

    let outcome = generate(&snapshot, &store, loader.payroll(), "2024-06-01");
    let payroll = outcome.payroll().unwrap();

    let mut ids: Vec<&str> = payroll.pay_slips.iter().map(|s| s.employee_id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["emp_001", "mgr_001"]);
}

#[test]
fn test_salary_override_and_totals() {
    let loader = load_config();
    let snapshot = PayrollSnapshot::new(vec![
        employee("emp_001", "User"),
        Employee {
            basic_salary: Some(decimal("31000")),
            ..employee("emp_002", "User")
        },
    ])
    .with_attendance(daily_attendance("emp_001", "2024-07-01", 31))
    .with_attendance(daily_attendance("emp_002", "2024-07-01", 31));
    let store = InMemoryPayrollStore::new();

    let outcome = generate(&snapshot, &store, loader.payroll(), "2024-07-01");
    let payroll = outcome.payroll().unwrap();

    assert_eq!(payroll.total_gross(), decimal("51000"));
    assert_eq!(payroll.total_deductions(), decimal("3200"));
    assert_eq!(payroll.total_net(), decimal("47800"));
}

#[test]
fn test_absent_all_month_clamps_pay() {
    let loader = load_config();
    let snapshot = PayrollSnapshot::new(vec![employee("emp_001", "User")]);
    let store = InMemoryPayrollStore::new();

    let outcome = generate(&snapshot, &store, loader.payroll(), "2024-06-01");
    let slip = outcome.payroll().unwrap().slip_for("emp_001").unwrap().clone();

    assert_eq!(slip.days_absent, 30);
    assert_eq!(slip.gross_pay, Decimal::ZERO);
    assert_eq!(slip.net_pay, Decimal::ZERO);
}

#[test]
fn test_generated_payroll_serializes() {
    let loader = load_config();
    let snapshot = PayrollSnapshot::new(vec![employee("emp_001", "User")])
        .with_attendance(daily_attendance("emp_001", "2024-06-01", 30));
    let store = InMemoryPayrollStore::new();

    let outcome = generate(&snapshot, &store, loader.payroll(), "2024-06-01");
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["outcome"], "generated");
    assert_eq!(json["status"], "pending_approval");
    assert_eq!(json["month"], "2024-06-01");
    assert_eq!(json["pay_slips"].as_array().unwrap().len(), 1);
}

// =============================================================================
// SECTION 3: One Active Payroll Per Month
// =============================================================================

#[test]
fn test_regeneration_conflicts_until_archived() {
    let loader = load_config();
    let snapshot = PayrollSnapshot::new(vec![employee("emp_001", "User")]);
    let store = InMemoryPayrollStore::new();

    assert!(generate(&snapshot, &store, loader.payroll(), "2024-06-03").payroll().is_some());

    let second = generate(&snapshot, &store, loader.payroll(), "2024-06-28");
    assert_eq!(
        second,
        GenerateOutcome::AlreadyExists {
            month: date("2024-06-01")
        }
    );

    store.archive(date("2024-06-01")).unwrap();
    assert!(generate(&snapshot, &store, loader.payroll(), "2024-06-01").payroll().is_some());

    let active = store
        .payrolls()
        .unwrap()
        .iter()
        .filter(|p| p.is_active())
        .count();
    assert_eq!(active, 1);
    assert!(store.exists(date("2024-06-01"), true).unwrap());
}

#[test]
fn test_concurrent_requests_for_many_months() {
    let loader = load_config();
    let snapshot = PayrollSnapshot::new(vec![employee("emp_001", "User")]);
    let store = InMemoryPayrollStore::new();
    let locks = Arc::new(MonthLocks::new());
    let months = ["2024-01-15", "2024-02-15", "2024-03-15"];

    std::thread::scope(|scope| {
        for _ in 0..4 {
            for month in months {
                let locks = Arc::clone(&locks);
                let snapshot = &snapshot;
                let store = &store;
                let config = loader.payroll();
                scope.spawn(move || {
                    PayrollGenerator::new(PayrollSources::uniform(snapshot), store, config)
                        .with_locks(locks)
                        .generate(date(month))
                        .unwrap()
                });
            }
        }
    });

    let payrolls = store.payrolls().unwrap();
    assert_eq!(payrolls.len(), months.len());
    for month in ["2024-01-01", "2024-02-01", "2024-03-01"] {
        assert_eq!(
            payrolls.iter().filter(|p| p.month == date(month)).count(),
            1,
            "Expected exactly one payroll for {}",
            month
        );
    }
}

// =============================================================================
// SECTION 4: Ledger Aggregation
// =============================================================================

#[test]
fn test_monthly_net_income_scenario() {
    let ledger = LedgerSnapshot::new(vec![
        sale("2024-03-05T10:00:00", "1000"),
        LedgerEntry::new(
            at("2024-03-05T14:00:00"),
            decimal("-400"),
            EntryType::Expense,
            Category::Operations,
            "rent",
        ),
    ]);

    let totals = LedgerAggregator::new(&ledger)
        .monthly_totals(at("2024-03-31T23:59:59"))
        .unwrap();

    assert_eq!(totals.income, decimal("1000"));
    assert_eq!(totals.expenses, decimal("400"));
    assert_eq!(totals.net_income(), decimal("600"));
}

#[test]
fn test_dashboard_summary() {
    let ledger = LedgerSnapshot::new(vec![
        sale("2024-03-05T10:00:00", "1000"),
        sale("2024-03-18T10:00:00", "250"),
    ])
    .with_open_items(vec![
        OpenItem {
            id: "INV-001".to_string(),
            kind: OpenItemKind::Receivable,
            counterparty: "Northwind".to_string(),
            face_amount: decimal("1500"),
            due_date: date("2024-03-10"),
            linked_entries: vec![sale("2024-03-05T10:00:00", "1000")],
        },
        OpenItem {
            id: "INV-002".to_string(),
            kind: OpenItemKind::Receivable,
            counterparty: "Contoso".to_string(),
            face_amount: decimal("250"),
            due_date: date("2024-03-01"),
            linked_entries: vec![sale("2024-03-18T10:00:00", "250")],
        },
    ]);

    let summary = LedgerAggregator::new(&ledger)
        .summary(at("2024-03-18T17:00:00"))
        .unwrap();

    assert_eq!(summary.daily.income, decimal("250"));
    assert_eq!(summary.monthly.income, decimal("1250"));
    assert_eq!(summary.receivables.overdue.count, 1);
    assert_eq!(summary.receivables.overdue.amount, decimal("500"));
    assert_eq!(summary.receivables.pending.count, 0);
    assert_eq!(summary.payables.total_outstanding(), Decimal::ZERO);
}

// =============================================================================
// SECTION 5: Revenue Analysis
// =============================================================================

#[test]
fn test_revenue_analysis_with_default_window() {
    let loader = load_config();
    let ledger = LedgerSnapshot::new(
        (1..=12)
            .map(|month| {
                let amount = if month >= 11 { "20000" } else { "5000" };
                let when = format!("2024-{:02}-15T12:00:00", month);
                sale(&when, amount)
            })
            .chain(std::iter::once(sale("2024-12-02T09:00:00", "300")))
            .collect(),
    );

    let analysis = RevenueAnalyzer::new(&ledger, loader.analytics())
        .analyze(date("2024-12-20"))
        .unwrap();

    assert!(analysis.has_enough_data);
    assert_eq!(analysis.series.len(), 12);
    assert_eq!(analysis.high_months[0].total, decimal("20300"));

    let stats = analysis.statistics.unwrap();
    let high: Vec<f64> = vec![20300.0, 20000.0, 5000.0];
    assert_eq!(calculate_distribution(&high), stats.high);
    assert!(stats.test.t_statistic > 0.0);
    assert!(
        (0.0..=1.0).contains(&stats.test.p_value),
        "p-value {} out of range",
        stats.test.p_value
    );
}

#[test]
fn test_revenue_analysis_insufficient_data() {
    let loader = load_config();
    let ledger = LedgerSnapshot::new(vec![
        sale("2024-10-01T09:00:00", "100"),
        sale("2024-11-01T09:00:00", "100"),
        sale("2024-12-01T09:00:00", "100"),
    ]);

    let analysis = RevenueAnalyzer::new(&ledger, loader.analytics())
        .analyze(date("2024-12-31"))
        .unwrap();

    assert!(!analysis.has_enough_data);
    assert_eq!(analysis.series.len(), 3);
    assert!(analysis.high_months.is_empty() && analysis.low_months.is_empty());
    assert!(!analysis.is_significant(loader.analytics().significance_level));
}

#[test]
fn test_student_t_reference_values() {
    assert_eq!(student_t::cdf(0.0, 12.0), 0.5);
    assert!((student_t::cdf(1.0, 1.0) - 0.75).abs() < 1e-9);
    assert!((student_t::cdf(-1.0, 1.0) - 0.25).abs() < 1e-9);
}
