use serde_json::json;

use pr_core::ports::ApiRequest;
use pr_core::registry::endpoints::{self, fallback};
use pr_core::registry::{NewProperty, PropertyRegistered};
use pr_core::workflow::validation::{optional_text, parse_coordinates};

use crate::usecases::workflow::WorkflowSpec;

/// Raw registration form.
#[derive(Debug, Clone, Default)]
pub struct RegisterPropertyInput {
    pub matricula: String,
    pub previous_owner: Option<String>,
    pub current_owner: String,
    pub latitude: String,
    pub longitude: String,
}

/// `POST /properties`
pub struct RegisterPropertySpec;

impl WorkflowSpec for RegisterPropertySpec {
    type Input = RegisterPropertyInput;
    type Call = NewProperty;
    type Outcome = PropertyRegistered;

    const NAME: &'static str = "register_property";

    fn validate(input: RegisterPropertyInput) -> Result<NewProperty, String> {
        let (latitude, longitude) = parse_coordinates(&input.latitude, &input.longitude)?;
        Ok(NewProperty {
            matricula: input.matricula.trim().to_string(),
            previous_owner: optional_text(input.previous_owner.as_deref()),
            current_owner: input.current_owner.trim().to_string(),
            latitude,
            longitude,
        })
    }

    fn request(call: NewProperty) -> ApiRequest {
        ApiRequest::post(endpoints::PROPERTIES)
            .with_json(json!(call))
            .with_fallback_error(fallback::REGISTER_PROPERTY)
    }
}
