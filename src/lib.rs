//! DID registry contract: maintains DID Documents, Schemas and Credential
//! Definitions, each keyed by a `did:cheqd:...` identifier. Lifecycle
//! operations are authorized by Ed25519 signatures from the controllers of
//! the affected document rather than by the transaction sender.

pub mod contract;
pub mod did;
mod error;
pub mod msg;
pub mod state;
pub mod verify;

#[cfg(test)]
mod tests;

pub use crate::error::ContractError;
