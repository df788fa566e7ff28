use cosmwasm_std::StdError;
use thiserror::Error;

use crate::state::Namespace;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Signatures: is required")]
    SignaturesRequired {},

    #[error("{field}: is required")]
    Required { field: String },

    #[error("signature {did} not found: invalid signature detected")]
    SignatureNotFound { did: String },

    #[error("Authentication {vm_ref} not found: invalid signature detected")]
    AuthenticationNotFound { vm_ref: String },

    #[error("{did}: invalid signature detected")]
    InvalidSignature { did: String },

    #[error("{id}: DID Doc not found")]
    DidDocNotFound { id: String },

    #[error("DID is already used by {namespace} {id}: DID Doc exists")]
    DidDocExists { namespace: Namespace, id: String },

    #[error("{reason}: bad request")]
    BadRequest { reason: String },

    #[error("{vm_id} not belong {did} DID Doc: invalid verification method")]
    NotBelongingVerificationMethod { vm_id: String, did: String },

    #[error("invalid cred def value")]
    InvalidCredDefValue {},
}

impl ContractError {
    /// Stable numeric code reported to the host envelope alongside the
    /// display text.
    pub fn code(&self) -> u32 {
        match self {
            ContractError::Std(_) => 1,
            ContractError::SignaturesRequired {}
            | ContractError::SignatureNotFound { .. }
            | ContractError::AuthenticationNotFound { .. }
            | ContractError::InvalidSignature { .. } => 1100,
            ContractError::DidDocExists { .. } => 1200,
            ContractError::InvalidCredDefValue {} => 1300,
            ContractError::DidDocNotFound { .. } => 1400,
            ContractError::NotBelongingVerificationMethod { .. } => 1500,
            ContractError::Required { .. } | ContractError::BadRequest { .. } => 1600,
        }
    }
}
