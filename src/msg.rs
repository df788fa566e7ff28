use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;

use crate::did;
use crate::error::ContractError;
use crate::state::{
    CredDef, CredDefValue, DidDocument, Metadata, Schema, Service, VerificationMethod,
};
use crate::verify::decode_multibase_key;

#[cw_serde]
pub struct InstantiateMsg {}

/// One signature over the canonical serialization of a payload, attributed
/// to a verification method.
#[cw_serde]
pub struct SignInfo {
    pub verification_method_id: String,
    /// Raw 64-byte Ed25519 signature
    pub signature: Binary,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Create a DID Document
    CreateDid {
        msg: MsgCreateDid,
        signatures: Vec<SignInfo>,
    },
    /// Replace an existing DID Document with a new version
    UpdateDid {
        msg: MsgUpdateDid,
        signatures: Vec<SignInfo>,
    },
    /// Create a schema anchored to an existing DID
    CreateSchema {
        msg: MsgCreateSchema,
        signatures: Vec<SignInfo>,
    },
    /// Create a credential definition anchored to an existing DID
    CreateCredDef {
        msg: MsgCreateCredDef,
        signatures: Vec<SignInfo>,
    },
}

#[cw_serde]
#[derive(Default)]
pub struct MsgCreateDid {
    pub id: String,
    pub controller: Vec<String>,
    pub verification_method: Vec<VerificationMethod>,
    pub authentication: Vec<String>,
    pub assertion_method: Vec<String>,
    pub key_agreement: Vec<String>,
    pub capability_invocation: Vec<String>,
    pub capability_delegation: Vec<String>,
    pub service: Vec<Service>,
    pub also_known_as: Vec<String>,
    pub context: Vec<String>,
}

#[cw_serde]
#[derive(Default)]
pub struct MsgUpdateDid {
    pub id: String,
    pub controller: Vec<String>,
    pub verification_method: Vec<VerificationMethod>,
    pub authentication: Vec<String>,
    pub assertion_method: Vec<String>,
    pub key_agreement: Vec<String>,
    pub capability_invocation: Vec<String>,
    pub capability_delegation: Vec<String>,
    pub service: Vec<Service>,
    pub also_known_as: Vec<String>,
    pub context: Vec<String>,
    /// Version token of the stored document this update is based on
    pub version_id: String,
}

#[cw_serde]
#[derive(Default)]
pub struct MsgCreateSchema {
    pub id: String,
    #[serde(rename = "type")]
    pub schema_type: String,
    pub name: String,
    pub version: String,
    pub attr_names: Vec<String>,
    pub controller: String,
}

#[cw_serde]
#[derive(Default)]
pub struct MsgCreateCredDef {
    pub id: String,
    pub schema_id: String,
    pub tag: String,
    #[serde(rename = "type")]
    pub signature_type: String,
    pub controller: String,
    pub value: Option<CredDefValue>,
}

#[cw_serde]
pub struct MsgCreateDidResponse {
    pub id: String,
}

#[cw_serde]
pub struct MsgUpdateDidResponse {
    pub id: String,
}

#[cw_serde]
pub struct MsgCreateSchemaResponse {
    pub id: String,
}

#[cw_serde]
pub struct MsgCreateCredDefResponse {
    pub id: String,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Resolve a DID Document and its metadata
    #[returns(DidResponse)]
    GetDid { id: String },
}

#[cw_serde]
pub struct DidResponse {
    pub did: DidDocument,
    pub metadata: Metadata,
}

impl MsgCreateDid {
    pub fn validate(&self) -> Result<(), ContractError> {
        validate_document(
            &self.id,
            &self.controller,
            &self.authentication,
            &self.verification_method,
            [
                &self.authentication,
                &self.assertion_method,
                &self.key_agreement,
                &self.capability_invocation,
                &self.capability_delegation,
            ],
        )
    }

    pub fn into_did(self) -> DidDocument {
        DidDocument {
            context: self.context,
            id: self.id,
            controller: self.controller,
            verification_method: self.verification_method,
            authentication: self.authentication,
            assertion_method: self.assertion_method,
            key_agreement: self.key_agreement,
            capability_invocation: self.capability_invocation,
            capability_delegation: self.capability_delegation,
            service: self.service,
            also_known_as: self.also_known_as,
        }
    }
}

impl MsgUpdateDid {
    pub fn validate(&self) -> Result<(), ContractError> {
        validate_document(
            &self.id,
            &self.controller,
            &self.authentication,
            &self.verification_method,
            [
                &self.authentication,
                &self.assertion_method,
                &self.key_agreement,
                &self.capability_invocation,
                &self.capability_delegation,
            ],
        )
    }

    pub fn into_did(self) -> DidDocument {
        DidDocument {
            context: self.context,
            id: self.id,
            controller: self.controller,
            verification_method: self.verification_method,
            authentication: self.authentication,
            assertion_method: self.assertion_method,
            key_agreement: self.key_agreement,
            capability_invocation: self.capability_invocation,
            capability_delegation: self.capability_delegation,
            service: self.service,
            also_known_as: self.also_known_as,
        }
    }
}

impl MsgCreateSchema {
    pub fn validate(&self) -> Result<(), ContractError> {
        did::parse_entity_did(&self.id)?;
        did::parse_did(&self.controller)?;
        if self.name.is_empty() {
            return Err(ContractError::Required {
                field: "Name".to_string(),
            });
        }
        if self.attr_names.is_empty() {
            return Err(ContractError::Required {
                field: "AttrNames".to_string(),
            });
        }
        Ok(())
    }

    pub fn into_schema(self) -> Schema {
        Schema {
            id: self.id,
            schema_type: self.schema_type,
            name: self.name,
            version: self.version,
            attr_names: self.attr_names,
            controller: self.controller,
        }
    }
}

impl MsgCreateCredDef {
    pub fn validate(&self) -> Result<(), ContractError> {
        did::parse_entity_did(&self.id)?;
        did::parse_did(&self.controller)?;
        if self.schema_id.is_empty() {
            return Err(ContractError::Required {
                field: "SchemaId".to_string(),
            });
        }
        if self.tag.is_empty() {
            return Err(ContractError::Required {
                field: "Tag".to_string(),
            });
        }
        if self.value.is_none() {
            return Err(ContractError::InvalidCredDefValue {});
        }
        Ok(())
    }

    pub fn into_cred_def(self) -> Result<CredDef, ContractError> {
        Ok(CredDef {
            id: self.id,
            schema_id: self.schema_id,
            tag: self.tag,
            signature_type: self.signature_type,
            controller: self.controller,
            value: self.value.ok_or(ContractError::InvalidCredDefValue {})?,
        })
    }
}

/// Shared structural validation for candidate DID Documents: identifier
/// grammar, the controller-or-authentication requirement, verification
/// methods belonging to the document, and every key reference resolving to
/// a verification method.
fn validate_document(
    id: &str,
    controller: &[String],
    authentication: &[String],
    verification_method: &[VerificationMethod],
    reference_lists: [&[String]; 5],
) -> Result<(), ContractError> {
    did::parse_did(id)?;

    if controller.is_empty() && authentication.is_empty() {
        return Err(ContractError::BadRequest {
            reason: "The message must contain either a Controller or a Authentication".to_string(),
        });
    }

    for c in controller {
        did::parse_did(c)?;
    }

    for vm in verification_method {
        let (vm_did, _) = did::parse_vm_ref(&vm.id)?;
        if vm_did != id {
            return Err(ContractError::NotBelongingVerificationMethod {
                vm_id: vm.id.clone(),
                did: id.to_string(),
            });
        }
        did::parse_did(&vm.controller)?;
        if decode_multibase_key(&vm.public_key_multibase).is_none() {
            return Err(ContractError::BadRequest {
                reason: format!(
                    "verification method {} public key must decode to a 32 byte Ed25519 key",
                    vm.id
                ),
            });
        }
    }

    for refs in reference_lists {
        for vm_ref in refs {
            did::parse_vm_ref(vm_ref)?;
            if !verification_method.iter().any(|vm| &vm.id == vm_ref) {
                return Err(ContractError::BadRequest {
                    reason: format!("{}: verification method not found", vm_ref),
                });
            }
        }
    }

    Ok(())
}
