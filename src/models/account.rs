//! Account models returned by the account commands.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Account category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AccountTypeName {
    /// Current (checking) account.
    Current,
    /// Savings account.
    Savings,
    /// Credit card.
    CreditCard,
    /// Individual savings account.
    Isa,
    /// General investment account.
    Investment,
    /// Pension pot.
    Pension,
    /// Physical cash.
    Cash,
    /// Loan.
    Loan,
}

impl AccountTypeName {
    /// Every account type, in display order.
    pub const ALL: [Self; 8] = [
        Self::Current,
        Self::Savings,
        Self::CreditCard,
        Self::Isa,
        Self::Investment,
        Self::Pension,
        Self::Cash,
        Self::Loan,
    ];

    /// Wire key, e.g. `credit_card`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Savings => "savings",
            Self::CreditCard => "credit_card",
            Self::Isa => "isa",
            Self::Investment => "investment",
            Self::Pension => "pension",
            Self::Cash => "cash",
            Self::Loan => "loan",
        }
    }
}

impl Display for AccountTypeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Window of an account's activity sparkline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActivityPeriod {
    /// One week.
    #[serde(rename = "1W")]
    P1W,
    /// One month.
    #[serde(rename = "1M")]
    P1M,
    /// Three months.
    #[serde(rename = "3M")]
    P3M,
    /// Six months.
    #[serde(rename = "6M")]
    P6M,
}

/// Window of a balance-over-time chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BalanceOverTimePeriod {
    /// One month.
    #[serde(rename = "1M")]
    P1M,
    /// Six months.
    #[serde(rename = "6M")]
    P6M,
    /// One year.
    #[serde(rename = "1Y")]
    P1Y,
    /// Since the first snapshot.
    #[serde(rename = "MAX")]
    Max,
}

/// Daily balances for one activity window, in minor units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityDataDto {
    /// One value per day; `None` before the first known balance.
    pub values: Vec<Option<i64>>,
    /// Last known value minus first known value.
    pub delta_minor: i64,
}

/// Financial institution holding an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstitutionDto {
    /// Institution identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// Account type reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountTypeDto {
    /// Account type identifier.
    pub id: i64,
    /// Account type key.
    pub name: AccountTypeName,
}

/// Account with its latest balance and activity series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountDto {
    /// Account identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Owning institution.
    pub institution: InstitutionDto,
    /// Account category.
    pub account_type: AccountTypeDto,
    /// ISO 4217 currency code.
    pub currency_code: String,
    /// `1` for assets, `-1` for liabilities.
    pub normal_balance_sign: i32,
    /// Date the account was opened, if known.
    pub opened_date: Option<NaiveDate>,
    /// Date the account was closed, if closed.
    pub closed_date: Option<NaiveDate>,
    /// Date of the earliest balance snapshot.
    pub first_snapshot_date: NaiveDate,
    /// Date of the latest balance snapshot.
    pub latest_snapshot_date: NaiveDate,
    /// Latest balance in minor units.
    pub latest_balance_minor: i64,
    /// Sparkline data per window.
    pub activity_by_period: BTreeMap<ActivityPeriod, ActivityDataDto>,
}

/// Recorded balance of an account on one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountBalanceSnapshotDto {
    /// Snapshot identifier.
    pub id: i64,
    /// Balance date.
    pub date: NaiveDate,
    /// Balance in minor units.
    pub balance_minor: i64,
    /// When the snapshot was recorded.
    pub created_at: DateTime<Utc>,
}

/// Forward-filled balance of one account on one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalancePointDto {
    /// Point date.
    pub date: NaiveDate,
    /// Balance in minor units.
    pub balance_minor: i64,
}
