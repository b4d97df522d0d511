//! Usage ledger implementations

mod in_memory;
mod postgres;

pub use in_memory::InMemoryUsageLedger;
pub use postgres::PostgresUsageLedger;
