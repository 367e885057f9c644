//! Dashboard models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::account::AccountTypeName;

/// Positive balance held in one account type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardAllocationDto {
    /// Account category.
    pub account_type: AccountTypeName,
    /// Summed balance in minor units.
    pub balance_minor: i64,
}

/// Total balance across all accounts on one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardBalancePointDto {
    /// Point date.
    pub date: NaiveDate,
    /// Total balance in minor units.
    pub balance_minor: i64,
}

/// Headline dashboard figures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardDto {
    /// Sum of latest balances.
    pub total_balance_minor: i64,
    /// Month-over-month change in percent.
    pub change_vs_last_month_pct: f64,
    /// Balance change over the last 30 days.
    pub monthly_yield_minor: i64,
    /// Accounts with a non-zero latest balance.
    pub active_accounts: u32,
    /// Allocation chart data; only positive groups.
    pub allocation_by_type: Vec<DashboardAllocationDto>,
}
