use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::client::NewClient;
use crate::forms::FormError;
use crate::locale::DisplayLocale;

#[derive(Debug, Deserialize, Validate)]
/// Creation form for a new client.
pub struct AddClientForm {
    #[validate(length(min = 1))]
    pub name: String,
    /// Contracted service.
    #[validate(length(min = 1))]
    pub service: String,
    /// Start date in the locale's short form or ISO `yyyy-mm-dd`.
    #[validate(length(min = 1))]
    pub start_date: String,
    /// Note seeding the timeline.
    #[validate(length(min = 1))]
    pub initial_status: String,
}

impl AddClientForm {
    pub fn to_new_client(&self, locale: &dyn DisplayLocale) -> Result<NewClient, FormError> {
        let start_date = parse_start_date(&self.start_date, locale)?;
        NewClient::try_new(
            self.name.as_str(),
            self.service.as_str(),
            start_date,
            self.initial_status.as_str(),
        )
        .map_err(|e| FormError::InvalidValue(e.to_string()))
    }
}

fn parse_start_date(value: &str, locale: &dyn DisplayLocale) -> Result<NaiveDate, FormError> {
    locale
        .parse_short_date(value)
        .or_else(|| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok())
        .ok_or_else(|| FormError::InvalidDate(value.to_string()))
}
