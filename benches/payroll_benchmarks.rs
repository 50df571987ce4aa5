//! Performance benchmarks for the payroll engine.
//!
//! Covers the two hot paths: a full orchestrated month for one employee,
//! and the raw FIFO overtime ledger at increasing record counts.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::runtime::Runtime;

use payroll_engine::calculation::{PayrollOrchestrator, build_overtime_ledger};
use payroll_engine::models::{
    ApprovalStatus, BusinessTrip, Employee, LeaveRequest, LeaveType, LeaveUnit, TimeEntry,
};
use payroll_engine::records::MemoryRecords;
use payroll_engine::settings::StaticSettings;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

/// A realistic month: daily regular shifts, scattered overtime, one
/// holiday, comp leave, and a couple of trips.
fn fixture_records() -> MemoryRecords {
    let mut records = MemoryRecords::new().with_employee(Employee {
        id: "emp_bench".to_string(),
        name: "Bench Employee".to_string(),
        base_salary_cents: 4_800_000,
        hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        is_deleted: false,
    });

    for day in 1..=28 {
        records = records.with_time_entry(
            "emp_bench",
            TimeEntry {
                date: date(day),
                work_type_code: 1,
                hours: Decimal::new(8, 0),
            },
        );
        if day % 3 == 0 {
            records = records.with_time_entry(
                "emp_bench",
                TimeEntry {
                    date: date(day),
                    work_type_code: 2,
                    hours: Decimal::new(2, 0),
                },
            );
        }
    }
    records = records
        .with_time_entry(
            "emp_bench",
            TimeEntry {
                date: date(7),
                work_type_code: 7,
                hours: Decimal::new(10, 0),
            },
        )
        .with_leave_request(
            "emp_bench",
            LeaveRequest {
                leave_type: LeaveType::Compensatory,
                unit: LeaveUnit::Day,
                amount: Decimal::ONE,
                start_date: date(20),
                end_date: date(20),
                status: ApprovalStatus::Approved,
            },
        )
        .with_business_trip(
            "emp_bench",
            BusinessTrip {
                date: date(12),
                distance_km: Decimal::new(12, 0),
                status: ApprovalStatus::Approved,
            },
        );
    records
}

fn bench_full_calculation(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let orchestrator = PayrollOrchestrator::new(fixture_records(), StaticSettings::new());

    c.bench_function("calculate_employee_payroll/full_month", |b| {
        b.to_async(&rt).iter(|| async {
            orchestrator
                .calculate_employee_payroll(black_box("emp_bench"), black_box("2026-03"))
                .await
                .expect("calculation succeeds")
        })
    });
}

fn bench_overtime_ledger(c: &mut Criterion) {
    let mut group = c.benchmark_group("overtime_ledger");
    for record_count in [10usize, 100, 500] {
        let entries: Vec<TimeEntry> = (0..record_count)
            .map(|i| TimeEntry {
                date: date((i % 28) as u32 + 1),
                work_type_code: if i % 4 == 0 { 7 } else { 2 },
                hours: Decimal::new(2, 0),
            })
            .collect();
        let leave = vec![LeaveRequest {
            leave_type: LeaveType::Compensatory,
            unit: LeaveUnit::Hour,
            amount: Decimal::new(record_count as i64, 0),
            start_date: date(28),
            end_date: date(28),
            status: ApprovalStatus::Approved,
        }];

        group.bench_with_input(
            BenchmarkId::from_parameter(record_count),
            &entries,
            |b, entries| {
                b.iter(|| build_overtime_ledger(black_box(entries), black_box(&leave), 20_000, 1))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_full_calculation, bench_overtime_ledger);
criterion_main!(benches);
