//! Payroll orchestration.
//!
//! [`PayrollOrchestrator`] composes the calculators into one itemized
//! result for an employee and month. It owns the injected record store
//! and settings provider; the calculation itself is pure — all I/O is
//! front-loaded into the record fetches, and nothing is logged from
//! inside the computation. Decisions land in the audit trace instead.

use std::time::Instant;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{EngineResult, PayrollError};
use crate::models::{
    AuditTrace, LeaveRequest, LeaveType, PayrollMonth, PayrollResult, SalaryItemLine,
};
use crate::records::RecordStore;
use crate::settings::{Settings, SettingsProvider};

use super::{
    aggregate_timesheet, build_overtime_ledger, calculate_leave_deduction,
    calculate_meal_allowance, calculate_transport_allowance, classify_salary_items, div_round,
    is_full_attendance,
};

/// Composes the calculators into complete monthly payroll results.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::PayrollOrchestrator;
/// use payroll_engine::records::MemoryRecords;
/// use payroll_engine::settings::StaticSettings;
/// use payroll_engine::models::Employee;
/// use chrono::NaiveDate;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let records = MemoryRecords::new().with_employee(Employee {
///     id: "emp_001".to_string(),
///     name: "Lin Wei".to_string(),
///     base_salary_cents: 4_800_000,
///     hire_date: NaiveDate::from_ymd_opt(2022, 4, 1).unwrap(),
///     is_deleted: false,
/// });
/// let orchestrator = PayrollOrchestrator::new(records, StaticSettings::new());
/// let result = orchestrator
///     .calculate_employee_payroll("emp_001", "2026-03")
///     .await
///     .unwrap();
/// assert_eq!(result.net_cents, 4_800_000);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct PayrollOrchestrator<R, P> {
    records: R,
    settings: P,
}

impl<R: RecordStore, P: SettingsProvider> PayrollOrchestrator<R, P> {
    /// Creates an orchestrator over a record store and settings provider.
    pub fn new(records: R, settings: P) -> Self {
        Self { records, settings }
    }

    /// The underlying record store.
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Calculates the full itemized payroll for one employee and month.
    ///
    /// The month must be a `YYYY-MM` string; a malformed month or an
    /// unknown employee is reported as a distinct error outcome before
    /// any calculation starts. Batch callers catch per-employee errors
    /// and keep going.
    pub async fn calculate_employee_payroll(
        &self,
        employee_id: &str,
        month: &str,
    ) -> EngineResult<PayrollResult> {
        let started = Instant::now();
        let target: PayrollMonth = month.parse()?;

        let employee = self
            .records
            .employee(employee_id)
            .await?
            .filter(|e| !e.is_deleted)
            .ok_or_else(|| PayrollError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })?;

        let settings = Settings::load(&self.settings).await;

        let first_day = target.first_day();
        let last_day = target.last_day();
        let entries = self.records.time_entries(employee_id, first_day, last_day).await?;
        let month_leave = self.records.leave_requests(employee_id, first_day, last_day).await?;
        let year_leave = self
            .records
            .leave_requests(employee_id, target.year_start(), last_day)
            .await?;
        let trips = self.records.business_trips(employee_id, first_day, last_day).await?;
        let assignments = self.records.salary_items(employee_id).await?;
        let adjustment = self.records.bonus_adjustment(employee_id, &target).await?;
        let year_end_record = self.records.year_end_bonus(employee_id, target.year()).await?;

        let mut steps = Vec::new();
        let mut warnings = Vec::new();

        // Hourly rate for overtime payout comes from base salary alone;
        // the leave-deduction rate below also folds in regular allowances.
        let hourly_rate_cents = div_round(employee.base_salary_cents, settings.hourly_rate_divisor);

        let timesheet = aggregate_timesheet(&entries, 1);
        steps.push(timesheet.audit_step);
        warnings.extend(timesheet.warnings);

        let ledger = build_overtime_ledger(&entries, &month_leave, hourly_rate_cents, 2);
        steps.push(ledger.audit_step);
        warnings.extend(ledger.warnings);

        let classified = classify_salary_items(&assignments, &target, 3);
        steps.push(classified.audit_step);
        let mut items = classified.items;

        // Fold the scheduled year-end payout into the year-end bucket.
        if let Some(record) = year_end_record
            && record.payment_month == target.month()
        {
            items.year_end_bonuses.push(SalaryItemLine {
                item_type_id: "year_end_record".to_string(),
                item_code: "year_end_record".to_string(),
                name: format!("Year-end bonus {}", record.year),
                amount_cents: record.amount_cents,
                is_full_attendance_bonus: false,
                should_pay: true,
            });
        }

        let full_attendance = is_full_attendance(&month_leave);
        items.apply_full_attendance(full_attendance);

        let meal = calculate_meal_allowance(&entries, &settings, 4);
        steps.push(meal.audit_step);

        let transport = calculate_transport_allowance(&trips, &settings, 5);
        steps.push(transport.audit_step);

        let year_to_date_menstrual_hours: Decimal = year_leave
            .iter()
            .filter(|request| request.is_approved() && request.leave_type == LeaveType::Menstrual)
            .map(LeaveRequest::hours)
            .sum();
        let leave = calculate_leave_deduction(
            &month_leave,
            year_to_date_menstrual_hours,
            employee.base_salary_cents,
            items.regular_allowance_cents(),
            &settings,
            6,
        );
        steps.push(leave.audit_step);

        let (performance_bonus_cents, performance_overridden) = match adjustment {
            Some(adjustment) => (adjustment.amount_cents, true),
            None => (items.performance_default_cents(), false),
        };

        let gross_cents = employee.base_salary_cents
            + items.regular_allowance_cents()
            + items.irregular_allowance_cents()
            + items.payable_bonus_cents()
            + items.payable_year_end_bonus_cents()
            + performance_bonus_cents
            + ledger.summary.expired_comp_pay_cents
            + meal.allowance.amount_cents
            + transport.allowance.amount_cents;
        let total_deduction_cents = items.deduction_cents() + leave.summary.leave_deduction_cents;
        let net_cents = gross_cents - total_deduction_cents;

        Ok(PayrollResult {
            calculation_id: Uuid::new_v4(),
            employee_id: employee.id,
            employee_name: employee.name,
            month: target.to_string(),
            base_salary_cents: employee.base_salary_cents,
            hourly_rate_cents,
            timesheet: timesheet.summary,
            overtime: ledger.summary,
            leave: leave.summary,
            meal_allowance: meal.allowance,
            transport_allowance: transport.allowance,
            items,
            performance_bonus_cents,
            performance_overridden,
            is_full_attendance: full_attendance,
            gross_cents,
            total_deduction_cents,
            net_cents,
            audit_trace: AuditTrace {
                steps,
                warnings,
                duration_us: started.elapsed().as_micros() as u64,
            },
        })
    }
}
