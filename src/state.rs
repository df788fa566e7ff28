use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Storage;
use cw_storage_plus::Map;

use crate::error::ContractError;

#[cw_serde]
pub struct VerificationMethod {
    /// Fragment-qualified id, `<did>#<fragment>`
    pub id: String,
    /// Key type, e.g. Ed25519VerificationKey2020
    #[serde(rename = "type")]
    pub method_type: String,
    /// DID of the party controlling this key
    pub controller: String,
    /// Multibase-encoded public key (`z` prefix = base58btc)
    pub public_key_multibase: String,
}

#[cw_serde]
pub struct Service {
    /// Fragment-qualified id, `<did>#<fragment>`
    pub id: String,
    /// Service type, e.g. DIDCommMessaging
    #[serde(rename = "type")]
    pub service_type: String,
    pub service_endpoint: String,
}

#[cw_serde]
#[derive(Default)]
pub struct DidDocument {
    pub context: Vec<String>,
    /// Canonical DID string, primary key, immutable
    pub id: String,
    /// DIDs whose authentication keys authorize changes to this document
    pub controller: Vec<String>,
    pub verification_method: Vec<VerificationMethod>,
    /// Verification-method references admitted as authorization proof
    pub authentication: Vec<String>,
    pub assertion_method: Vec<String>,
    pub key_agreement: Vec<String>,
    pub capability_invocation: Vec<String>,
    pub capability_delegation: Vec<String>,
    pub service: Vec<Service>,
    pub also_known_as: Vec<String>,
}

#[cw_serde]
pub struct Metadata {
    /// Block time of creation, in seconds
    pub created: u64,
    /// Block time of the last successful update, in seconds
    pub updated: u64,
    /// Opaque version token, replaced on every successful mutation
    pub version_id: String,
}

#[cw_serde]
pub struct DidDocumentState {
    pub did_doc: DidDocument,
    pub metadata: Metadata,
}

#[cw_serde]
pub struct Schema {
    pub id: String,
    #[serde(rename = "type")]
    pub schema_type: String,
    pub name: String,
    pub version: String,
    pub attr_names: Vec<String>,
    /// DID anchoring this schema
    pub controller: String,
}

#[cw_serde]
pub struct CredDef {
    pub id: String,
    pub schema_id: String,
    pub tag: String,
    #[serde(rename = "type")]
    pub signature_type: String,
    /// DID anchoring this credential definition
    pub controller: String,
    pub value: CredDefValue,
}

#[cw_serde]
pub enum CredDefValue {
    ClType(ClCredDefValue),
}

#[cw_serde]
pub struct ClCredDefValue {
    pub primary: String,
    pub revocation: Option<String>,
}

/// DID Documents keyed by the raw DID string
pub const DID_DOCS: Map<&str, DidDocumentState> = Map::new("did_docs");

/// Schemas keyed by the raw DID string
pub const SCHEMAS: Map<&str, Schema> = Map::new("schemas");

/// Credential definitions keyed by the raw DID string
pub const CRED_DEFS: Map<&str, CredDef> = Map::new("cred_defs");

/// The three storage namespaces sharing one id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    DidDoc,
    Schema,
    CredDef,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::DidDoc => write!(f, "DIDDoc"),
            Namespace::Schema => write!(f, "Schema"),
            Namespace::CredDef => write!(f, "CredDef"),
        }
    }
}

/// Uniqueness over the union of all three namespaces. The error names the
/// namespace already holding the id.
pub fn ensure_did_not_used(storage: &dyn Storage, id: &str) -> Result<(), ContractError> {
    let taken = if DID_DOCS.has(storage, id) {
        Some(Namespace::DidDoc)
    } else if SCHEMAS.has(storage, id) {
        Some(Namespace::Schema)
    } else if CRED_DEFS.has(storage, id) {
        Some(Namespace::CredDef)
    } else {
        None
    };

    match taken {
        Some(namespace) => Err(ContractError::DidDocExists {
            namespace,
            id: id.to_string(),
        }),
        None => Ok(()),
    }
}

impl DidDocument {
    /// The DIDs whose authentication keys guard this document: the
    /// controller list, or the document itself when no controller is set.
    /// Deliberately non-transitive; a controller's own controllers are
    /// never consulted.
    pub fn controllers_or_subject(&self) -> Vec<&str> {
        if self.controller.is_empty() {
            vec![self.id.as_str()]
        } else {
            self.controller.iter().map(String::as_str).collect()
        }
    }
}
