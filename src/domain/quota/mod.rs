//! Quota domain: window policy and admission decisions

mod decision;
mod window;

pub use decision::{AdmissionDecision, QuotaCheck};
pub use window::{utc_day_window, DayWindow};
