use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{StatusNote, TimelineIcon};

/// Icon attached to the entry seeded at creation.
pub const CREATED_ICON: &str = "flag-checkered";
/// Icon attached to the synthetic completion entry.
pub const COMPLETED_ICON: &str = "check-circle";

/// One immutable, dated status note in a client's history.
///
/// `date` holds the label rendered when the entry was appended and is never
/// re-derived from `recorded_on` afterwards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineEntry {
    pub recorded_on: NaiveDate,
    pub date: String,
    pub description: StatusNote,
    pub icon: Option<TimelineIcon>,
}

impl TimelineEntry {
    #[must_use]
    pub fn new(recorded_on: NaiveDate, date: String, description: StatusNote) -> Self {
        Self {
            recorded_on,
            date,
            description,
            icon: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: TimelineIcon) -> Self {
        self.icon = Some(icon);
        self
    }
}
