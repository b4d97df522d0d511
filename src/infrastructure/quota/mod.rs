//! Quota enforcement engine

mod enforcer;

pub use enforcer::QuotaEnforcer;
