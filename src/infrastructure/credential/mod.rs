//! Credential infrastructure: token generation, storage, and the
//! registration service

mod in_memory;
mod postgres;
mod service;
mod token;

pub use in_memory::InMemoryCredentialRepository;
pub use postgres::PostgresCredentialRepository;
pub use service::CredentialService;
pub use token::TokenGenerator;
