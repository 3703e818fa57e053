// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Bill, CalendarEvent, ExpenseLine};

/// Validates a monetary amount: finite and non-negative.
fn validate_amount(field: &str, amount: f64) -> Result<(), DomainError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(DomainError::InvalidField {
            field: field.to_string(),
            message: format!("Amount must be a non-negative number, got {amount}"),
        });
    }
    Ok(())
}

/// Validates the embedded event drafts of a calendar.
///
/// Drafts must carry a non-empty title and category and a non-negative
/// budget. Inverted date ranges are deliberately not rejected here; the
/// overlap detector excludes them defensively instead.
///
/// # Arguments
///
/// * `events` - The drafts to validate
///
/// # Errors
///
/// Returns `DomainError::InvalidField` naming the first offending field.
pub fn validate_calendar_events(events: &[CalendarEvent]) -> Result<(), DomainError> {
    for event in events {
        if event.title.trim().is_empty() {
            return Err(DomainError::InvalidField {
                field: String::from("title"),
                message: String::from("Event title cannot be empty"),
            });
        }
        if event.category.trim().is_empty() {
            return Err(DomainError::InvalidField {
                field: String::from("category"),
                message: format!("Event '{}' has an empty category", event.title),
            });
        }
        validate_amount("estimated_budget", event.estimated_budget)?;
    }
    Ok(())
}

/// Validates a proposal's expense breakdown.
///
/// # Arguments
///
/// * `lines` - The breakdown lines to validate
///
/// # Errors
///
/// Returns `DomainError::InvalidField` if a line has an empty description or
/// an invalid amount. An empty breakdown is permitted (a zero-cost event).
pub fn validate_expense_breakdown(lines: &[ExpenseLine]) -> Result<(), DomainError> {
    for line in lines {
        if line.description.trim().is_empty() {
            return Err(DomainError::InvalidField {
                field: String::from("expense_breakdown"),
                message: String::from("Expense line description cannot be empty"),
            });
        }
        validate_amount("expense_breakdown", line.amount)?;
    }
    Ok(())
}

/// Validates the bill list of an expense submission.
///
/// # Arguments
///
/// * `bills` - The bills to validate
///
/// # Errors
///
/// Returns `DomainError::InvalidField` if the list is empty, a bill has an
/// empty description, or an amount is invalid.
pub fn validate_bills(bills: &[Bill]) -> Result<(), DomainError> {
    if bills.is_empty() {
        return Err(DomainError::InvalidField {
            field: String::from("bills"),
            message: String::from("An expense must contain at least one bill"),
        });
    }

    for bill in bills {
        if bill.description.trim().is_empty() {
            return Err(DomainError::InvalidField {
                field: String::from("bills"),
                message: String::from("Bill description cannot be empty"),
            });
        }
        validate_amount("bills", bill.amount)?;
    }
    Ok(())
}

/// Validates the look-ahead horizon of a pending-proposals query.
///
/// # Arguments
///
/// * `days_until_due` - The requested horizon in days
///
/// # Errors
///
/// Returns `DomainError::InvalidField` if the horizon is negative.
pub fn validate_days_until_due(days_until_due: i64) -> Result<(), DomainError> {
    if days_until_due < 0 {
        return Err(DomainError::InvalidField {
            field: String::from("days_until_due"),
            message: format!("Horizon must be zero or more days, got {days_until_due}"),
        });
    }
    Ok(())
}
