use serde_json::json;

use pr_core::ports::ApiRequest;
use pr_core::registry::endpoints::{self, fallback};
use pr_core::registry::{NewProposal, ProposalSubmitted};
use pr_core::workflow::validation::{optional_text, parse_amount, parse_fraction};

use crate::usecases::workflow::WorkflowSpec;

/// Raw proposal form. Blank `fraction` means the whole property.
#[derive(Debug, Clone, Default)]
pub struct SubmitProposalInput {
    pub matricula: String,
    pub amount: String,
    pub fraction: Option<String>,
    pub message: Option<String>,
}

/// `POST /proposals`
pub struct SubmitProposalSpec;

impl WorkflowSpec for SubmitProposalSpec {
    type Input = SubmitProposalInput;
    type Call = NewProposal;
    type Outcome = ProposalSubmitted;

    const NAME: &'static str = "submit_proposal";

    fn validate(input: SubmitProposalInput) -> Result<NewProposal, String> {
        let amount = parse_amount(&input.amount)?;
        let fraction = parse_fraction(input.fraction.as_deref())?;
        Ok(NewProposal {
            matricula: input.matricula.trim().to_string(),
            amount,
            fraction,
            message: optional_text(input.message.as_deref()),
        })
    }

    fn request(call: NewProposal) -> ApiRequest {
        ApiRequest::post(endpoints::PROPOSALS)
            .with_json(json!(call))
            .with_fallback_error(fallback::SUBMIT_PROPOSAL)
    }
}
