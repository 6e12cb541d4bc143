// [libs/domain/models/src/credential.rs]
//! Credential pool membership and wire shapes shared between the API client
//! and the services that configure it. The lease/backoff machinery itself
//! lives in `skirmish-infra-api-client`; this module only fixes the vocabulary.

use serde::{Deserialize, Serialize};

/// The two disjoint credential pools. Membership is fixed at process start
/// and never migrates between pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialPoolKind {
    Main,
    Tournament,
}

impl std::fmt::Display for CredentialPoolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialPoolKind::Main => write!(f, "main"),
            CredentialPoolKind::Tournament => write!(f, "tournament"),
        }
    }
}

/// A single upstream API key and its per-minute request budget.
#[derive(Debug, Clone)]
pub struct CredentialSpec {
    pub secret: String,
    pub rpm_limit: u32,
}
