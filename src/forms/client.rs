use serde::Deserialize;
use validator::Validate;

use crate::domain::client::UpdateClient;
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
/// Partial edit of an existing client.
pub struct SaveClientForm {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub service: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
/// New status note for a client's timeline.
pub struct AddUpdateForm {
    #[validate(length(min = 1))]
    pub text: String,
}

impl TryFrom<SaveClientForm> for UpdateClient {
    type Error = FormError;

    fn try_from(form: SaveClientForm) -> Result<Self, Self::Error> {
        UpdateClient::try_new(form.name, form.service)
            .map_err(|e| FormError::InvalidValue(e.to_string()))
    }
}
