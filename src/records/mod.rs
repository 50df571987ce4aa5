//! Read-only record lookups.
//!
//! The engine consumes, but does not define the storage for, employee
//! master data, timesheets, leave requests, business trips, and salary
//! item configuration. [`RecordStore`] is that seam; [`MemoryRecords`] is
//! the in-memory implementation backing tests and benches.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{
    BonusAdjustment, BusinessTrip, Employee, LeaveRequest, PayrollMonth, SalaryItemAssignment,
    TimeEntry, YearEndBonusRecord,
};

/// Read-only lookups against the systems that own payroll input records.
///
/// All methods are keyed by employee and, where meaningful, a date range.
/// Implementations are expected to be cheap to call repeatedly; the engine
/// queries exactly once per record kind per calculation.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    /// Fetches one employee by id, `None` when unknown.
    async fn employee(&self, employee_id: &str) -> EngineResult<Option<Employee>>;

    /// All non-deleted employees, the population of a snapshot run.
    async fn employees(&self) -> EngineResult<Vec<Employee>>;

    /// Time entries dated within `[from, to]`, in recorded order.
    async fn time_entries(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<TimeEntry>>;

    /// Leave requests whose window overlaps `[from, to]`, any status.
    async fn leave_requests(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<LeaveRequest>>;

    /// Business trips dated within `[from, to]`, any status.
    async fn business_trips(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<BusinessTrip>>;

    /// All salary item assignments for the employee, active or not.
    async fn salary_items(&self, employee_id: &str) -> EngineResult<Vec<SalaryItemAssignment>>;

    /// The performance-bonus override for the month, if one was recorded.
    async fn bonus_adjustment(
        &self,
        employee_id: &str,
        month: &PayrollMonth,
    ) -> EngineResult<Option<BonusAdjustment>>;

    /// The year-end bonus record for the calendar year, if one exists.
    async fn year_end_bonus(
        &self,
        employee_id: &str,
        year: i32,
    ) -> EngineResult<Option<YearEndBonusRecord>>;
}

/// In-memory [`RecordStore`] built up through `with_*` calls.
///
/// # Example
///
/// ```
/// use payroll_engine::records::MemoryRecords;
/// use payroll_engine::models::Employee;
/// use chrono::NaiveDate;
///
/// let records = MemoryRecords::new().with_employee(Employee {
///     id: "emp_001".to_string(),
///     name: "Lin Wei".to_string(),
///     base_salary_cents: 4_800_000,
///     hire_date: NaiveDate::from_ymd_opt(2022, 4, 1).unwrap(),
///     is_deleted: false,
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRecords {
    employees: Vec<Employee>,
    time_entries: HashMap<String, Vec<TimeEntry>>,
    leave_requests: HashMap<String, Vec<LeaveRequest>>,
    business_trips: HashMap<String, Vec<BusinessTrip>>,
    salary_items: HashMap<String, Vec<SalaryItemAssignment>>,
    bonus_adjustments: HashMap<String, Vec<BonusAdjustment>>,
    year_end_bonuses: HashMap<String, Vec<YearEndBonusRecord>>,
}

impl MemoryRecords {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an employee.
    pub fn with_employee(mut self, employee: Employee) -> Self {
        self.employees.push(employee);
        self
    }

    /// Adds a time entry for an employee.
    pub fn with_time_entry(mut self, employee_id: &str, entry: TimeEntry) -> Self {
        self.time_entries.entry(employee_id.to_string()).or_default().push(entry);
        self
    }

    /// Adds a leave request for an employee.
    pub fn with_leave_request(mut self, employee_id: &str, request: LeaveRequest) -> Self {
        self.leave_requests.entry(employee_id.to_string()).or_default().push(request);
        self
    }

    /// Adds a business trip for an employee.
    pub fn with_business_trip(mut self, employee_id: &str, trip: BusinessTrip) -> Self {
        self.business_trips.entry(employee_id.to_string()).or_default().push(trip);
        self
    }

    /// Adds a salary item assignment for an employee.
    pub fn with_salary_item(mut self, employee_id: &str, item: SalaryItemAssignment) -> Self {
        self.salary_items.entry(employee_id.to_string()).or_default().push(item);
        self
    }

    /// Adds a performance-bonus override.
    pub fn with_bonus_adjustment(mut self, adjustment: BonusAdjustment) -> Self {
        self.bonus_adjustments
            .entry(adjustment.employee_id.clone())
            .or_default()
            .push(adjustment);
        self
    }

    /// Adds a year-end bonus record for an employee.
    pub fn with_year_end_bonus(mut self, employee_id: &str, record: YearEndBonusRecord) -> Self {
        self.year_end_bonuses.entry(employee_id.to_string()).or_default().push(record);
        self
    }
}

impl RecordStore for MemoryRecords {
    async fn employee(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        Ok(self.employees.iter().find(|e| e.id == employee_id).cloned())
    }

    async fn employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.employees.iter().filter(|e| !e.is_deleted).cloned().collect())
    }

    async fn time_entries(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<TimeEntry>> {
        Ok(self
            .time_entries
            .get(employee_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.date >= from && e.date <= to)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn leave_requests(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<LeaveRequest>> {
        Ok(self
            .leave_requests
            .get(employee_id)
            .map(|requests| {
                requests
                    .iter()
                    .filter(|r| r.overlaps(from, to))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn business_trips(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<BusinessTrip>> {
        Ok(self
            .business_trips
            .get(employee_id)
            .map(|trips| {
                trips
                    .iter()
                    .filter(|t| t.date >= from && t.date <= to)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn salary_items(&self, employee_id: &str) -> EngineResult<Vec<SalaryItemAssignment>> {
        Ok(self.salary_items.get(employee_id).cloned().unwrap_or_default())
    }

    async fn bonus_adjustment(
        &self,
        employee_id: &str,
        month: &PayrollMonth,
    ) -> EngineResult<Option<BonusAdjustment>> {
        let month = month.to_string();
        Ok(self
            .bonus_adjustments
            .get(employee_id)
            .and_then(|adjustments| adjustments.iter().find(|a| a.month == month))
            .cloned())
    }

    async fn year_end_bonus(
        &self,
        employee_id: &str,
        year: i32,
    ) -> EngineResult<Option<YearEndBonusRecord>> {
        Ok(self
            .year_end_bonuses
            .get(employee_id)
            .and_then(|records| records.iter().find(|r| r.year == year))
            .cloned())
    }
}
