use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;
use sha2::{Digest, Sha256};

use crate::error::ContractError;
use crate::msg::{
    DidResponse, ExecuteMsg, InstantiateMsg, MsgCreateCredDef, MsgCreateCredDefResponse,
    MsgCreateDid, MsgCreateDidResponse, MsgCreateSchema, MsgCreateSchemaResponse, MsgUpdateDid,
    MsgUpdateDidResponse, QueryMsg, SignInfo,
};
use crate::state::{
    ensure_did_not_used, DidDocumentState, Metadata, CRED_DEFS, DID_DOCS, SCHEMAS,
};
use crate::verify::{create_signers, update_signers, verify_signatures, Signer};

const CONTRACT_NAME: &str = "crates.io:did-registry";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("method", "instantiate"))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateDid { msg, signatures } => {
            execute_create_did(deps, env, msg, signatures)
        }
        ExecuteMsg::UpdateDid { msg, signatures } => {
            execute_update_did(deps, env, msg, signatures)
        }
        ExecuteMsg::CreateSchema { msg, signatures } => {
            execute_create_schema(deps, env, msg, signatures)
        }
        ExecuteMsg::CreateCredDef { msg, signatures } => {
            execute_create_cred_def(deps, env, msg, signatures)
        }
    }
}

pub fn execute_create_did(
    deps: DepsMut,
    env: Env,
    msg: MsgCreateDid,
    signatures: Vec<SignInfo>,
) -> Result<Response, ContractError> {
    if signatures.is_empty() {
        return Err(ContractError::SignaturesRequired {});
    }
    msg.validate()?;
    ensure_did_not_used(deps.storage, &msg.id)?;

    let signing_input = to_json_binary(&msg)?;
    let did_doc = msg.into_did();

    let signers = create_signers(&did_doc);
    verify_signatures(deps.as_ref(), &signers, &signatures, &signing_input)?;

    let metadata = Metadata {
        created: env.block.time.seconds(),
        updated: env.block.time.seconds(),
        version_id: version_token(&signing_input),
    };
    let id = did_doc.id.clone();
    DID_DOCS.save(deps.storage, &id, &DidDocumentState { did_doc, metadata })?;

    Ok(Response::new()
        .set_data(to_json_binary(&MsgCreateDidResponse { id: id.clone() })?)
        .add_attribute("method", "create_did")
        .add_attribute("id", id))
}

pub fn execute_update_did(
    deps: DepsMut,
    env: Env,
    msg: MsgUpdateDid,
    signatures: Vec<SignInfo>,
) -> Result<Response, ContractError> {
    if signatures.is_empty() {
        return Err(ContractError::SignaturesRequired {});
    }
    msg.validate()?;

    let state = DID_DOCS
        .may_load(deps.storage, &msg.id)?
        .ok_or_else(|| ContractError::DidDocNotFound { id: msg.id.clone() })?;
    if msg.version_id != state.metadata.version_id {
        return Err(ContractError::BadRequest {
            reason: "unexpected DID version".to_string(),
        });
    }

    let signing_input = to_json_binary(&msg)?;
    let updated = msg.into_did();

    let signers = update_signers(&state.did_doc, &updated);
    verify_signatures(deps.as_ref(), &signers, &signatures, &signing_input)?;

    let metadata = Metadata {
        created: state.metadata.created,
        updated: env.block.time.seconds(),
        version_id: version_token(&signing_input),
    };
    let id = updated.id.clone();
    DID_DOCS.save(
        deps.storage,
        &id,
        &DidDocumentState {
            did_doc: updated,
            metadata,
        },
    )?;

    Ok(Response::new()
        .set_data(to_json_binary(&MsgUpdateDidResponse { id: id.clone() })?)
        .add_attribute("method", "update_did")
        .add_attribute("id", id))
}

pub fn execute_create_schema(
    deps: DepsMut,
    _env: Env,
    msg: MsgCreateSchema,
    signatures: Vec<SignInfo>,
) -> Result<Response, ContractError> {
    if signatures.is_empty() {
        return Err(ContractError::SignaturesRequired {});
    }
    msg.validate()?;
    ensure_did_not_used(deps.storage, &msg.id)?;

    let signing_input = to_json_binary(&msg)?;
    let signers = [Signer {
        did: &msg.controller,
        document: None,
    }];
    verify_signatures(deps.as_ref(), &signers, &signatures, &signing_input)?;

    let schema = msg.into_schema();
    let id = schema.id.clone();
    SCHEMAS.save(deps.storage, &id, &schema)?;

    Ok(Response::new()
        .set_data(to_json_binary(&MsgCreateSchemaResponse { id: id.clone() })?)
        .add_attribute("method", "create_schema")
        .add_attribute("id", id))
}

pub fn execute_create_cred_def(
    deps: DepsMut,
    _env: Env,
    msg: MsgCreateCredDef,
    signatures: Vec<SignInfo>,
) -> Result<Response, ContractError> {
    if signatures.is_empty() {
        return Err(ContractError::SignaturesRequired {});
    }
    msg.validate()?;
    ensure_did_not_used(deps.storage, &msg.id)?;

    let signing_input = to_json_binary(&msg)?;
    let signers = [Signer {
        did: &msg.controller,
        document: None,
    }];
    verify_signatures(deps.as_ref(), &signers, &signatures, &signing_input)?;

    let cred_def = msg.into_cred_def()?;
    let id = cred_def.id.clone();
    CRED_DEFS.save(deps.storage, &id, &cred_def)?;

    Ok(Response::new()
        .set_data(to_json_binary(&MsgCreateCredDefResponse { id: id.clone() })?)
        .add_attribute("method", "create_cred_def")
        .add_attribute("id", id))
}

/// Opaque version token for document metadata: the content hash of the
/// canonical payload that produced the stored version.
fn version_token(signing_input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(signing_input);
    format!("{:x}", hasher.finalize())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GetDid { id } => to_json_binary(&query_did(deps, id)?),
    }
}

fn query_did(deps: Deps, id: String) -> StdResult<DidResponse> {
    let state = DID_DOCS.load(deps.storage, &id)?;
    Ok(DidResponse {
        did: state.did_doc,
        metadata: state.metadata,
    })
}
