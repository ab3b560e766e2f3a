//! Transfer initiation and signing.
//!
//! Two operations of one feature, run on two independent workflow instances.
//! The four approval flags and any `tx_hash` come back from the server; the
//! client does not know the completion threshold.

use serde_json::json;

use pr_core::ports::ApiRequest;
use pr_core::registry::endpoints::{self, fallback};
use pr_core::registry::{TransferAction, TransferActionRequest, TransferInitiated, TransferSigned};
use pr_core::workflow::validation::parse_proposal_id;

use crate::usecases::workflow::WorkflowSpec;

/// `POST /transfers/{proposalId}/initiate`. Input is the raw proposal id.
pub struct InitiateTransferSpec;

impl WorkflowSpec for InitiateTransferSpec {
    type Input = String;
    type Call = u64;
    type Outcome = TransferInitiated;

    const NAME: &'static str = "initiate_transfer";

    fn validate(proposal_id: String) -> Result<u64, String> {
        parse_proposal_id(&proposal_id)
    }

    fn request(proposal_id: u64) -> ApiRequest {
        ApiRequest::post(endpoints::transfer_initiate(proposal_id))
            .with_fallback_error(fallback::INITIATE_TRANSFER)
    }
}

#[derive(Debug, Clone)]
pub struct SignTransferInput {
    pub proposal_id: String,
    pub action: TransferAction,
}

/// `POST /transfers/{proposalId}/sign`
pub struct SignTransferSpec;

impl WorkflowSpec for SignTransferSpec {
    type Input = SignTransferInput;
    type Call = (u64, TransferAction);
    type Outcome = TransferSigned;

    const NAME: &'static str = "sign_transfer";

    fn validate(input: SignTransferInput) -> Result<(u64, TransferAction), String> {
        Ok((parse_proposal_id(&input.proposal_id)?, input.action))
    }

    fn request((proposal_id, action): (u64, TransferAction)) -> ApiRequest {
        ApiRequest::post(endpoints::transfer_sign(proposal_id))
            .with_json(json!(TransferActionRequest { action }))
            .with_fallback_error(fallback::SIGN_TRANSFER)
    }
}
