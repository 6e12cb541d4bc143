// [libs/infra/api-client/src/lib.rs]
//! Credential pool and upstream API client.

mod client;
mod credential_pool;
mod errors;

pub use client::ApiClient;
pub use credential_pool::{CredentialLease, CredentialPool};
pub use errors::ClientError;
