//! Diesel models for storing client timeline entries.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::timeline::TimelineEntry as DomainTimelineEntry;
use crate::domain::types::{StatusNote, TimelineIcon, TypeConstraintError};
use crate::models::client::Client;

/// Stored entry. `position` counts from the oldest entry (0) upwards.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(table_name = crate::schema::timeline_entries)]
pub struct TimelineEntry {
    pub id: i32,
    pub client_id: i32,
    pub position: i32,
    pub recorded_on: NaiveDate,
    pub label: String,
    pub description: String,
    pub icon: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::timeline_entries)]
pub struct NewTimelineEntry<'a> {
    pub client_id: i32,
    pub position: i32,
    pub recorded_on: NaiveDate,
    pub label: &'a str,
    pub description: &'a str,
    pub icon: Option<&'a str>,
}

impl<'a> NewTimelineEntry<'a> {
    pub fn from_domain(client_id: i32, position: i32, entry: &'a DomainTimelineEntry) -> Self {
        Self {
            client_id,
            position,
            recorded_on: entry.recorded_on,
            label: entry.date.as_str(),
            description: entry.description.as_str(),
            icon: entry.icon.as_ref().map(|icon| icon.as_str()),
        }
    }
}

impl TryFrom<TimelineEntry> for DomainTimelineEntry {
    type Error = TypeConstraintError;

    fn try_from(entry: TimelineEntry) -> Result<Self, Self::Error> {
        Ok(DomainTimelineEntry {
            recorded_on: entry.recorded_on,
            date: entry.label,
            description: StatusNote::new(entry.description)?,
            icon: entry.icon.map(TimelineIcon::new).transpose()?,
        })
    }
}
