//! DTOs shaped for the list cards and the detail view.

use serde::Serialize;

use crate::domain::client::{Client, ClientStatus};
use crate::domain::timeline::TimelineEntry;
use crate::locale::DisplayLocale;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TimelineEntryView {
    pub date: String,
    pub description: String,
    pub icon: Option<String>,
}

/// Client as rendered by views, with dates already formatted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClientView {
    pub id: String,
    pub name: String,
    pub service: String,
    pub status: ClientStatus,
    /// Short form of the latest timeline date.
    pub display_date: String,
    pub timeline: Vec<TimelineEntryView>,
}

impl From<&TimelineEntry> for TimelineEntryView {
    fn from(entry: &TimelineEntry) -> Self {
        Self {
            date: entry.date.clone(),
            description: entry.description.to_string(),
            icon: entry.icon.as_ref().map(ToString::to_string),
        }
    }
}

impl ClientView {
    pub fn render(client: &Client, locale: &dyn DisplayLocale) -> Self {
        Self {
            id: client.id().to_string(),
            name: client.name().to_string(),
            service: client.service().to_string(),
            status: client.status(),
            display_date: locale.short_date(client.display_date()),
            timeline: client.timeline().iter().map(Into::into).collect(),
        }
    }
}
