//! Signature requirement engine. Computes which DIDs must sign a create or
//! update and checks the supplied signature list against those obligations.

use cosmwasm_std::{Api, Deps};

use crate::did;
use crate::error::ContractError;
use crate::msg::SignInfo;
use crate::state::{DidDocument, DID_DOCS};

const ED25519_KEY_LEN: usize = 32;

/// A signature obligation on behalf of one DID. `document` carries the
/// candidate document for the self-control case on create, where the
/// document being created is its own authoritative key set; otherwise the
/// obligation is checked against the stored document.
pub struct Signer<'a> {
    pub did: &'a str,
    pub document: Option<&'a DidDocument>,
}

/// Obligations for creating `doc`: its controller list in order, or the
/// document itself when no controller is set.
pub fn create_signers(doc: &DidDocument) -> Vec<Signer> {
    doc.controllers_or_subject()
        .into_iter()
        .map(|did| Signer {
            did,
            document: (did == doc.id).then_some(doc),
        })
        .collect()
}

/// Obligations for replacing `old` with `new`: the union of both documents'
/// controller sets plus the controllers affected by verification-method
/// changes. Both old and new configurations must authorize the change:
///
/// - a method added under a foreign controller obligates that controller,
/// - a method whose record changed obligates its new controller (when
///   foreign) and always its previous controller,
/// - a removed method always obligates its previous controller.
///
/// Additions controlled by the document itself carry no obligation. All
/// obligations, including the document's own, are discharged against the
/// stored document's authentication set.
pub fn update_signers<'a>(old: &'a DidDocument, new: &'a DidDocument) -> Vec<Signer<'a>> {
    let mut dids: Vec<&str> = Vec::new();

    for c in old.controllers_or_subject() {
        push_unique(&mut dids, c);
    }
    for c in new.controllers_or_subject() {
        push_unique(&mut dids, c);
    }

    for vm in &new.verification_method {
        match old.verification_method.iter().find(|o| o.id == vm.id) {
            None => {
                if vm.controller != new.id {
                    push_unique(&mut dids, &vm.controller);
                }
            }
            Some(o) if o != vm => {
                if vm.controller != new.id {
                    push_unique(&mut dids, &vm.controller);
                }
                push_unique(&mut dids, &o.controller);
            }
            Some(_) => {}
        }
    }

    for o in &old.verification_method {
        if !new.verification_method.iter().any(|vm| vm.id == o.id) {
            push_unique(&mut dids, &o.controller);
        }
    }

    dids.into_iter()
        .map(|did| Signer {
            did,
            document: None,
        })
        .collect()
}

fn push_unique<'a>(dids: &mut Vec<&'a str>, did: &'a str) {
    if !dids.iter().any(|d| *d == did) {
        dids.push(did);
    }
}

/// Checks every obligation against the supplied signature list, in
/// obligation order; the first unsatisfied obligation produces the error.
/// Supplied signatures that discharge no obligation are ignored.
pub fn verify_signatures(
    deps: Deps,
    signers: &[Signer],
    signatures: &[SignInfo],
    signing_input: &[u8],
) -> Result<(), ContractError> {
    if signatures.is_empty() {
        return Err(ContractError::SignaturesRequired {});
    }

    for signer in signers {
        match signer.document {
            Some(doc) => verify_signer(deps.api, signer.did, doc, signatures, signing_input)?,
            None => {
                let state = DID_DOCS
                    .may_load(deps.storage, signer.did)?
                    .ok_or_else(|| ContractError::DidDocNotFound {
                        id: signer.did.to_string(),
                    })?;
                verify_signer(deps.api, signer.did, &state.did_doc, signatures, signing_input)?;
            }
        }
    }

    Ok(())
}

/// One obligation: every supplied signature attributed to `did` must name
/// an authentication key of `doc` and verify over `signing_input`.
fn verify_signer(
    api: &dyn Api,
    did: &str,
    doc: &DidDocument,
    signatures: &[SignInfo],
    signing_input: &[u8],
) -> Result<(), ContractError> {
    let mut found_one = false;
    let mut valid = true;

    for info in signatures {
        if did::vm_ref_did(&info.verification_method_id) != did {
            continue;
        }

        let public_key = find_authentication_key(doc, &info.verification_method_id)?;
        valid = valid
            && api
                .ed25519_verify(signing_input, info.signature.as_slice(), &public_key)
                .unwrap_or(false);
        found_one = true;
    }

    if !found_one {
        return Err(ContractError::SignatureNotFound {
            did: did.to_string(),
        });
    }
    if !valid {
        return Err(ContractError::InvalidSignature {
            did: did.to_string(),
        });
    }

    Ok(())
}

/// Looks up `vm_ref` in the document's authentication set and returns the
/// decoded public key of the matching verification method.
fn find_authentication_key(doc: &DidDocument, vm_ref: &str) -> Result<Vec<u8>, ContractError> {
    if !doc.authentication.iter().any(|a| a == vm_ref) {
        return Err(ContractError::AuthenticationNotFound {
            vm_ref: vm_ref.to_string(),
        });
    }

    let vm = doc
        .verification_method
        .iter()
        .find(|vm| vm.id == vm_ref)
        .ok_or_else(|| ContractError::AuthenticationNotFound {
            vm_ref: vm_ref.to_string(),
        })?;

    decode_multibase_key(&vm.public_key_multibase).ok_or_else(|| ContractError::InvalidSignature {
        did: doc.id.clone(),
    })
}

/// Decodes a multibase-encoded Ed25519 public key. Only the `z` (base58btc)
/// prefix is recognized; the decoded key must be exactly 32 bytes.
pub fn decode_multibase_key(encoded: &str) -> Option<Vec<u8>> {
    let encoded = encoded.strip_prefix('z')?;
    let bytes = bs58::decode(encoded).into_vec().ok()?;
    (bytes.len() == ED25519_KEY_LEN).then_some(bytes)
}
