use serde_json::json;

use pr_core::ports::ApiRequest;
use pr_core::registry::endpoints::{self, fallback};
use pr_core::registry::{Decision, DecisionRequest, ProposalDecided};
use pr_core::workflow::validation::parse_proposal_id;

use crate::usecases::workflow::WorkflowSpec;

#[derive(Debug, Clone)]
pub struct DecideProposalInput {
    pub proposal_id: String,
    pub decision: Decision,
}

/// `POST /proposals/{id}/decision`
pub struct DecideProposalSpec;

impl WorkflowSpec for DecideProposalSpec {
    type Input = DecideProposalInput;
    type Call = (u64, Decision);
    type Outcome = ProposalDecided;

    const NAME: &'static str = "decide_proposal";

    fn validate(input: DecideProposalInput) -> Result<(u64, Decision), String> {
        Ok((parse_proposal_id(&input.proposal_id)?, input.decision))
    }

    fn request((proposal_id, decision): (u64, Decision)) -> ApiRequest {
        ApiRequest::post(endpoints::proposal_decision(proposal_id))
            .with_json(json!(DecisionRequest { decision }))
            .with_fallback_error(fallback::DECIDE_PROPOSAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_is_transmitted_as_is() {
        let call = DecideProposalSpec::validate(DecideProposalInput {
            proposal_id: "12".into(),
            decision: Decision::Accept,
        })
        .unwrap();
        let request = DecideProposalSpec::request(call);

        assert_eq!(request.path, "/proposals/12/decision");
        assert_eq!(request.body, Some(json!({ "decision": "ACCEPT" })));
    }

    #[test]
    fn zero_id_is_rejected() {
        assert!(DecideProposalSpec::validate(DecideProposalInput {
            proposal_id: "0".into(),
            decision: Decision::Reject,
        })
        .is_err());
    }
}
