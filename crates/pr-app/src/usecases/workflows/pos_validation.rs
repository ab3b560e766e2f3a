use serde_json::json;

use pr_core::ports::ApiRequest;
use pr_core::registry::endpoints::{self, fallback};
use pr_core::registry::{PosOutcome, PosValidationRequest};
use pr_core::workflow::validation::{non_blank, MISSING_TX_REFERENCE};

use crate::usecases::workflow::WorkflowSpec;

#[derive(Debug, Clone, Default)]
pub struct PosValidationInput {
    pub tx_reference: String,
    /// Asks the server to simulate a rejected round.
    pub force_invalid: bool,
}

/// `POST /pos/validate`
pub struct PosValidationSpec;

impl WorkflowSpec for PosValidationSpec {
    type Input = PosValidationInput;
    type Call = PosValidationRequest;
    type Outcome = PosOutcome;

    const NAME: &'static str = "pos_validation";

    fn validate(input: PosValidationInput) -> Result<PosValidationRequest, String> {
        let tx_reference = non_blank(&input.tx_reference).ok_or(MISSING_TX_REFERENCE)?;
        Ok(PosValidationRequest {
            tx_reference: tx_reference.to_string(),
            force_invalid: input.force_invalid,
        })
    }

    fn request(call: PosValidationRequest) -> ApiRequest {
        ApiRequest::post(endpoints::POS_VALIDATE)
            .with_json(json!(call))
            .with_fallback_error(fallback::POS_VALIDATE)
    }
}
