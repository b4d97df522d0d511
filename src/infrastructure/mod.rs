//! Infrastructure layer: storage backends, token generation, enforcement

pub mod credential;
pub mod logging;
pub mod quota;
pub mod storage;
pub mod usage;
