//! Salary item classification.
//!
//! Evaluates each configured salary item assignment against the target
//! month — effective window plus recurrence — and buckets the paying ones
//! by category. Performance items are extracted by the reserved item code
//! and kept out of the monthly-bonus totals, because a monthly adjustment
//! may override them downstream.

use crate::models::{
    AuditStep, ClassifiedItems, PERFORMANCE_ITEM_CODE, PayrollMonth, RecurringType,
    SalaryItemAssignment, SalaryItemCategory, SalaryItemLine,
};

/// The result of classifying salary items, including the audit step.
#[derive(Debug, Clone)]
pub struct ClassifiedItemsResult {
    /// Paying items bucketed by category.
    pub items: ClassifiedItems,
    /// The audit step recording this classification.
    pub audit_step: AuditStep,
}

/// Whether the assignment's recurrence pays in the target month.
///
/// `monthly` always pays; `once` pays only in the effective month;
/// `yearly` pays when the target month appears in the stored month list.
/// Malformed month-list text defaults to paying — a configuration mistake
/// must not silently withhold pay.
fn recurrence_pays(assignment: &SalaryItemAssignment, month: &PayrollMonth) -> bool {
    match assignment.recurring_type {
        RecurringType::Monthly => true,
        RecurringType::Once => assignment.effective_in_month(month),
        RecurringType::Yearly => match &assignment.recurring_months {
            Some(raw) => match serde_json::from_str::<Vec<u32>>(raw) {
                Ok(months) => months.contains(&month.month()),
                Err(_) => true,
            },
            None => true,
        },
    }
}

/// Classifies salary item assignments for the target month.
///
/// Inactive assignments, assignments outside their effective window, and
/// assignments whose recurrence skips the month are dropped. Every
/// emitted line starts with `should_pay = true`; the orchestrator flips
/// the flag on full-attendance-conditional bonus lines once attendance is
/// known.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::classify_salary_items;
/// use payroll_engine::models::{
///     PayrollMonth, RecurringType, SalaryItemAssignment, SalaryItemCategory,
/// };
/// use chrono::NaiveDate;
///
/// let items = vec![SalaryItemAssignment {
///     item_type_id: "item_01".to_string(),
///     item_code: "transport_subsidy".to_string(),
///     name: "Transport subsidy".to_string(),
///     category: SalaryItemCategory::RegularAllowance,
///     amount_cents: 200_000,
///     recurring_type: RecurringType::Monthly,
///     recurring_months: None,
///     effective_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     expiry_date: None,
///     is_active: true,
///     is_full_attendance_bonus: false,
/// }];
/// let month: PayrollMonth = "2026-03".parse().unwrap();
/// let result = classify_salary_items(&items, &month, 1);
/// assert_eq!(result.items.regular_allowance_cents(), 200_000);
/// ```
pub fn classify_salary_items(
    assignments: &[SalaryItemAssignment],
    month: &PayrollMonth,
    step_number: u32,
) -> ClassifiedItemsResult {
    let mut items = ClassifiedItems::default();

    for assignment in assignments {
        if !assignment.is_active
            || !assignment.is_effective_in(month)
            || !recurrence_pays(assignment, month)
        {
            continue;
        }

        let line = SalaryItemLine {
            item_type_id: assignment.item_type_id.clone(),
            item_code: assignment.item_code.clone(),
            name: assignment.name.clone(),
            amount_cents: assignment.amount_cents,
            is_full_attendance_bonus: assignment.is_full_attendance_bonus,
            should_pay: true,
        };

        if assignment.item_code == PERFORMANCE_ITEM_CODE {
            items.performance_items.push(line);
            continue;
        }

        match assignment.category {
            SalaryItemCategory::RegularAllowance => items.regular_allowances.push(line),
            SalaryItemCategory::IrregularAllowance => items.irregular_allowances.push(line),
            SalaryItemCategory::Bonus => items.monthly_bonuses.push(line),
            SalaryItemCategory::YearEndBonus => items.year_end_bonuses.push(line),
            SalaryItemCategory::Deduction => items.deductions.push(line),
        }
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary_item_classification".to_string(),
        rule_name: "Salary Item Classification".to_string(),
        input: serde_json::json!({
            "assignments": assignments.len(),
            "month": month.to_string(),
        }),
        output: serde_json::json!({
            "regular_allowances": items.regular_allowances.len(),
            "irregular_allowances": items.irregular_allowances.len(),
            "monthly_bonuses": items.monthly_bonuses.len(),
            "year_end_bonuses": items.year_end_bonuses.len(),
            "deductions": items.deductions.len(),
            "performance_items": items.performance_items.len(),
        }),
        reasoning: format!(
            "{} of {} assignments pay in {month}",
            items.regular_allowances.len()
                + items.irregular_allowances.len()
                + items.monthly_bonuses.len()
                + items.year_end_bonuses.len()
                + items.deductions.len()
                + items.performance_items.len(),
            assignments.len()
        ),
    };

    ClassifiedItemsResult { items, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn assignment(
        code: &str,
        category: SalaryItemCategory,
        recurring_type: RecurringType,
    ) -> SalaryItemAssignment {
        SalaryItemAssignment {
            item_type_id: format!("type_{code}"),
            item_code: code.to_string(),
            name: code.to_string(),
            category,
            amount_cents: 100_000,
            recurring_type,
            recurring_months: None,
            effective_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            expiry_date: None,
            is_active: true,
            is_full_attendance_bonus: false,
        }
    }

    fn month(s: &str) -> PayrollMonth {
        s.parse().unwrap()
    }

    #[test]
    fn test_monthly_always_pays() {
        let items = vec![assignment(
            "meal",
            SalaryItemCategory::RegularAllowance,
            RecurringType::Monthly,
        )];
        let result = classify_salary_items(&items, &month("2026-03"), 1);
        assert_eq!(result.items.regular_allowances.len(), 1);
    }

    #[test]
    fn test_once_pays_only_in_effective_month() {
        let mut item = assignment("signing", SalaryItemCategory::Bonus, RecurringType::Once);
        item.effective_date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

        let in_march = classify_salary_items(std::slice::from_ref(&item), &month("2026-03"), 1);
        assert_eq!(in_march.items.monthly_bonuses.len(), 1);

        let in_april = classify_salary_items(&[item], &month("2026-04"), 1);
        assert!(in_april.items.monthly_bonuses.is_empty());
    }

    #[test]
    fn test_yearly_pays_in_listed_months_only() {
        let mut item = assignment("festival", SalaryItemCategory::Bonus, RecurringType::Yearly);
        item.recurring_months = Some("[2, 7]".to_string());

        let feb = classify_salary_items(std::slice::from_ref(&item), &month("2026-02"), 1);
        assert_eq!(feb.items.monthly_bonuses.len(), 1);

        let march = classify_salary_items(&[item], &month("2026-03"), 1);
        assert!(march.items.monthly_bonuses.is_empty());
    }

    #[test]
    fn test_malformed_recurring_months_defaults_to_paying() {
        let mut item = assignment("festival", SalaryItemCategory::Bonus, RecurringType::Yearly);
        item.recurring_months = Some("not json".to_string());
        let result = classify_salary_items(&[item], &month("2026-03"), 1);
        assert_eq!(result.items.monthly_bonuses.len(), 1);
    }

    #[test]
    fn test_inactive_assignment_skipped() {
        let mut item = assignment(
            "meal",
            SalaryItemCategory::RegularAllowance,
            RecurringType::Monthly,
        );
        item.is_active = false;
        let result = classify_salary_items(&[item], &month("2026-03"), 1);
        assert!(result.items.regular_allowances.is_empty());
    }

    #[test]
    fn test_expired_assignment_skipped() {
        let mut item = assignment(
            "meal",
            SalaryItemCategory::RegularAllowance,
            RecurringType::Monthly,
        );
        item.expiry_date = Some(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        let result = classify_salary_items(&[item], &month("2026-03"), 1);
        assert!(result.items.regular_allowances.is_empty());
    }

    #[test]
    fn test_performance_code_extracted_from_bonus_bucket() {
        let items = vec![
            assignment("duty", SalaryItemCategory::Bonus, RecurringType::Monthly),
            assignment(
                PERFORMANCE_ITEM_CODE,
                SalaryItemCategory::Bonus,
                RecurringType::Monthly,
            ),
        ];
        let result = classify_salary_items(&items, &month("2026-03"), 1);
        assert_eq!(result.items.monthly_bonuses.len(), 1);
        assert_eq!(result.items.performance_items.len(), 1);
        assert_eq!(result.items.performance_default_cents(), 100_000);
        assert_eq!(result.items.payable_bonus_cents(), 100_000);
    }

    #[test]
    fn test_deduction_bucket() {
        let items = vec![assignment(
            "labor_insurance",
            SalaryItemCategory::Deduction,
            RecurringType::Monthly,
        )];
        let result = classify_salary_items(&items, &month("2026-03"), 1);
        assert_eq!(result.items.deduction_cents(), 100_000);
    }

    #[test]
    fn test_full_attendance_flag_carried_onto_line() {
        let mut item = assignment("attendance", SalaryItemCategory::Bonus, RecurringType::Monthly);
        item.is_full_attendance_bonus = true;
        let result = classify_salary_items(&[item], &month("2026-03"), 1);
        assert!(result.items.monthly_bonuses[0].is_full_attendance_bonus);
        assert!(result.items.monthly_bonuses[0].should_pay);
    }
}
