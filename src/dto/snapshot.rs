//! Wire form of the collection exchanged with the sync backend.
//!
//! Dates travel as ISO values; the rendered timeline label is carried along
//! so it is never re-derived on the receiving side.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::client::{Client, ClientStatus};
use crate::domain::timeline::TimelineEntry;
use crate::domain::types::{ClientId, ClientName, ServiceDescription, TypeConstraintError};
use crate::locale::DisplayLocale;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineDocument {
    pub recorded_on: NaiveDate,
    /// Rendered label; filled from `recorded_on` when missing.
    #[serde(default)]
    pub date: Option<String>,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientDocument {
    pub id: String,
    pub name: String,
    pub service: String,
    pub status: ClientStatus,
    /// Server-side creation timestamp used for ordering.
    pub created_at: NaiveDateTime,
    /// Newest entry first.
    pub timeline: Vec<TimelineDocument>,
}

impl From<&Client> for ClientDocument {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id().to_string(),
            name: client.name().to_string(),
            service: client.service().to_string(),
            status: client.status(),
            created_at: client.created_at(),
            timeline: client
                .timeline()
                .iter()
                .map(|entry| TimelineDocument {
                    recorded_on: entry.recorded_on,
                    date: Some(entry.date.clone()),
                    description: entry.description.to_string(),
                    icon: entry.icon.as_ref().map(ToString::to_string),
                })
                .collect(),
        }
    }
}

impl ClientDocument {
    pub fn into_domain(self, locale: &dyn DisplayLocale) -> Result<Client, TypeConstraintError> {
        let timeline = self
            .timeline
            .into_iter()
            .map(|doc| -> Result<TimelineEntry, TypeConstraintError> {
                let label = doc
                    .date
                    .filter(|label| !label.trim().is_empty())
                    .unwrap_or_else(|| locale.long_date(doc.recorded_on));
                let mut entry =
                    TimelineEntry::new(doc.recorded_on, label, doc.description.try_into()?);
                if let Some(icon) = doc.icon {
                    entry = entry.with_icon(icon.try_into()?);
                }
                Ok(entry)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Client::try_from_parts(
            self.id.parse::<ClientId>()?,
            ClientName::new(self.name)?,
            ServiceDescription::new(self.service)?,
            self.status,
            timeline,
            self.created_at,
        )
    }
}
