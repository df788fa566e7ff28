//! Grammar for the identifiers used throughout the registry:
//! `did:cheqd:<network>:<unique-id>` and fragment-qualified
//! verification-method references `<did>#<fragment>`.

use crate::error::ContractError;

pub const DID_METHOD: &str = "cheqd";

/// Networks a DID may be anchored to.
pub const NETWORKS: [&str; 3] = ["mainnet", "testnet", "test"];

const MAX_UNIQUE_ID_LEN: usize = 64;

/// A parsed DID, borrowing its segments from the input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Did<'a> {
    pub method: &'a str,
    pub network: &'a str,
    pub unique_id: &'a str,
}

/// Parses a DID Document identifier. The unique-id segment is restricted to
/// alphanumerics, 1..=64 characters.
pub fn parse_did(input: &str) -> Result<Did, ContractError> {
    parse(input, false)
}

/// Parses a Schema or CredDef identifier. Same shape as a document DID but
/// the unique-id segment additionally admits `-`.
pub fn parse_entity_did(input: &str) -> Result<Did, ContractError> {
    parse(input, true)
}

fn parse(input: &str, admit_dash: bool) -> Result<Did, ContractError> {
    let not_a_did = || ContractError::BadRequest {
        reason: format!("{} is not a valid DID", input),
    };

    let rest = input.strip_prefix("did:").ok_or_else(not_a_did)?;
    let (method, rest) = rest.split_once(':').ok_or_else(not_a_did)?;
    let (network, unique_id) = rest.split_once(':').ok_or_else(not_a_did)?;

    if method != DID_METHOD {
        return Err(ContractError::BadRequest {
            reason: format!("did method must be {}, got {}", DID_METHOD, method),
        });
    }
    if !NETWORKS.contains(&network) {
        return Err(ContractError::BadRequest {
            reason: format!("{} is not a valid did namespace", network),
        });
    }
    if unique_id.is_empty() || unique_id.len() > MAX_UNIQUE_ID_LEN {
        return Err(not_a_did());
    }
    let valid_char = |c: char| c.is_ascii_alphanumeric() || (admit_dash && c == '-');
    if !unique_id.chars().all(valid_char) {
        return Err(not_a_did());
    }

    Ok(Did {
        method,
        network,
        unique_id,
    })
}

/// Parses a fully qualified verification-method reference into its DID and
/// fragment parts. Bare `#fragment` references are rejected.
pub fn parse_vm_ref(input: &str) -> Result<(&str, &str), ContractError> {
    let not_a_ref = || ContractError::BadRequest {
        reason: format!("{} is not a valid verification method reference", input),
    };

    let (did_part, fragment) = input.split_once('#').ok_or_else(not_a_ref)?;
    if fragment.is_empty() {
        return Err(not_a_ref());
    }
    parse_did(did_part)?;
    Ok((did_part, fragment))
}

/// The DID part of a verification-method reference, without validating it.
/// A reference with no fragment separator is treated as a whole DID.
pub fn vm_ref_did(vm_ref: &str) -> &str {
    vm_ref.split_once('#').map(|(did, _)| did).unwrap_or(vm_ref)
}

/// Whether `vm_ref` is fragment-qualified with `did` as its DID part.
pub fn same_did(vm_ref: &str, did: &str) -> bool {
    matches!(vm_ref.split_once('#'), Some((d, _)) if d == did)
}
