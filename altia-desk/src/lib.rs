//! Altia Desk - front-desk service layer for the cafe admin
//!
//! The table registry, order aggregator, billing/payout workflow, and
//! customer credit view, extracted into one shared module with an
//! explicit interface so view components stay thin and the page variants
//! stop drifting apart.

pub mod aggregator;
pub mod error;
pub mod ledger;
pub mod payout;
pub mod registry;

pub use aggregator::{OrderAggregator, TableBill};
pub use error::{DeskError, DeskResult};
pub use ledger::CreditLedger;
pub use payout::{
    Payout, PayoutError, PayoutInput, PayoutMethod, PayoutOutcome, PayoutSplit, PayoutState,
    PayoutStep,
};
pub use registry::{OccupancySummary, TableRegistry};
