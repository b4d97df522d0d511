//! Usage domain: the append-only ledger of admitted requests

mod record;
mod repository;

pub use record::{RequestOutcome, UsageRecord, UsageRecordId};
pub use repository::UsageLedger;
