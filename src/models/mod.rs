//! Payload types exchanged with the backend commands.

pub mod account;
pub mod dashboard;

pub use account::{
    AccountBalanceSnapshotDto, AccountDto, AccountTypeDto, AccountTypeName, ActivityDataDto,
    ActivityPeriod, BalanceOverTimePeriod, BalancePointDto, InstitutionDto,
};
pub use dashboard::{DashboardAllocationDto, DashboardBalancePointDto, DashboardDto};
