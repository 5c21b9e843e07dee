//! Performance benchmarks for the payroll and analytics engine.
//!
//! This benchmark suite covers:
//! - Reconciling a single employee's month
//! - Generating a payroll for 10, 100 and 1000 employees
//! - Student's t CDF for small and large statistics
//! - Revenue analysis over a year of daily sales
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Duration, NaiveDate, NaiveTime};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::analytics::{RevenueAnalyzer, calculate_distribution, student_t, welch_t_test};
use payroll_engine::calculation::{AttendanceReconciler, PayrollGenerator, PayrollSources};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::{
    AttendanceRecord, Category, Employee, EntryType, LedgerEntry, OvertimeRequest, OvertimeStatus,
};
use payroll_engine::providers::{InMemoryPayrollStore, LedgerSnapshot, PayrollSnapshot};

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/default").expect("Failed to load config")
}

fn june() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Creates a snapshot with `count` employees, each present every day of
/// June 2024 with one approved overtime request per week.
fn create_snapshot(count: usize) -> PayrollSnapshot {
    let employees: Vec<Employee> = (0..count)
        .map(|i| Employee {
            id: format!("emp_{:04}", i),
            name: format!("Employee {}", i),
            roles: vec!["User".to_string()],
            basic_salary: None,
        })
        .collect();

    let check_in = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
    let check_out = NaiveTime::from_hms_opt(19, 30, 0).unwrap();

    let attendance: Vec<AttendanceRecord> = employees
        .iter()
        .flat_map(|e| {
            (0..30).map(move |d| {
                let day = june() + Duration::days(d);
                AttendanceRecord {
                    employee_id: e.id.clone(),
                    check_in: day.and_time(check_in),
                    check_out: Some(day.and_time(check_out)),
                }
            })
        })
        .collect();

    let overtime: Vec<OvertimeRequest> = employees
        .iter()
        .flat_map(|e| {
            (0..4).map(move |w| OvertimeRequest {
                employee_id: e.id.clone(),
                date: june() + Duration::days(w * 7),
                start_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
                status: OvertimeStatus::Approved,
            })
        })
        .collect();

    PayrollSnapshot::new(employees)
        .with_attendance(attendance)
        .with_overtime(overtime)
}

/// Benchmark: one employee's month.
fn bench_single_reconciliation(c: &mut Criterion) {
    let loader = load_config();
    let snapshot = create_snapshot(1);
    let employee = Employee {
        id: "emp_0000".to_string(),
        name: "Employee 0".to_string(),
        roles: vec!["User".to_string()],
        basic_salary: None,
    };
    let reconciler =
        AttendanceReconciler::new(&snapshot, &snapshot, &snapshot, loader.payroll());

    c.bench_function("single_reconciliation", |b| {
        b.iter(|| black_box(reconciler.reconcile(black_box(&employee), june()).unwrap()))
    });
}

/// Benchmark: payroll generation across roster sizes.
fn bench_payroll_generation(c: &mut Criterion) {
    let loader = load_config();
    let mut group = c.benchmark_group("payroll_generation");

    for employee_count in [10usize, 100, 1000].iter() {
        let snapshot = create_snapshot(*employee_count);

        group.throughput(Throughput::Elements(*employee_count as u64));
        group.bench_with_input(
            BenchmarkId::new("employees", employee_count),
            employee_count,
            |b, _| {
                b.iter(|| {
                    let store = InMemoryPayrollStore::new();
                    let generator = PayrollGenerator::new(
                        PayrollSources::uniform(&snapshot),
                        &store,
                        loader.payroll(),
                    );
                    black_box(generator.generate(june()).unwrap())
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: the t CDF, whose integration cost grows with |t|.
fn bench_student_t_cdf(c: &mut Criterion) {
    let mut group = c.benchmark_group("student_t_cdf");

    for t in [1.5f64, 10.0, 100.0].iter() {
        group.bench_with_input(BenchmarkId::new("t", t), t, |b, t| {
            b.iter(|| black_box(student_t::cdf(black_box(*t), 7.3)))
        });
    }

    group.finish();
}

/// Benchmark: Welch's test on two small groups.
fn bench_welch_t_test(c: &mut Criterion) {
    let high = calculate_distribution(&[9000.0, 9500.0, 9800.0]);
    let low = calculate_distribution(&[900.0, 950.0, 980.0]);

    c.bench_function("welch_t_test", |b| {
        b.iter(|| black_box(welch_t_test(black_box(&high), black_box(&low))))
    });
}

/// Benchmark: revenue analysis over a year of daily sales.
fn bench_revenue_analysis(c: &mut Criterion) {
    let loader = load_config();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let entries: Vec<LedgerEntry> = (0..366)
        .map(|d| {
            let day = start + Duration::days(d);
            LedgerEntry::new(
                day.and_hms_opt(12, 0, 0).unwrap(),
                Decimal::new(1000 + (d % 31) * 17, 0),
                EntryType::Income,
                Category::Sales,
                "daily takings",
            )
        })
        .collect();
    let ledger = LedgerSnapshot::new(entries);
    let analyzer = RevenueAnalyzer::new(&ledger, loader.analytics());
    let reference = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

    c.bench_function("revenue_analysis_year", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(reference)).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_single_reconciliation,
    bench_payroll_generation,
    bench_student_t_cdf,
    bench_welch_t_test,
    bench_revenue_analysis,
);
criterion_main!(benches);
