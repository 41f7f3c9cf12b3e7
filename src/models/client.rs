use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::client::Client as DomainClient;
use crate::domain::timeline::TimelineEntry as DomainTimelineEntry;
use crate::domain::types::{ClientId, ClientName, ServiceDescription, TypeConstraintError};
use crate::models::timeline_entry::TimelineEntry;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub public_id: Vec<u8>,
    pub name: String,
    pub service: String,
    pub status: String,
    pub display_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub public_id: &'a [u8],
    pub name: &'a str,
    pub service: &'a str,
    pub status: &'a str,
    pub display_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
/// Whole-row replacement of the mutable columns.
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub service: &'a str,
    pub status: &'a str,
    pub display_date: NaiveDate,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewClient<'a> {
    pub fn from_domain(client: &'a DomainClient, now: NaiveDateTime) -> Self {
        Self {
            public_id: client.id_bytes().as_slice(),
            name: client.name().as_str(),
            service: client.service().as_str(),
            status: client.status().as_str(),
            display_date: client.display_date(),
            created_at: client.created_at(),
            updated_at: now,
        }
    }
}

impl<'a> UpdateClient<'a> {
    pub fn from_domain(client: &'a DomainClient, now: NaiveDateTime) -> Self {
        Self {
            name: client.name().as_str(),
            service: client.service().as_str(),
            status: client.status().as_str(),
            display_date: client.display_date(),
            updated_at: now,
        }
    }
}

impl Client {
    /// Assembles the domain record. `entries` must be ordered newest first.
    pub fn into_domain(
        self,
        entries: Vec<TimelineEntry>,
    ) -> Result<DomainClient, TypeConstraintError> {
        let timeline = entries
            .into_iter()
            .map(DomainTimelineEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        DomainClient::try_from_parts(
            ClientId::from_bytes(&self.public_id)?,
            ClientName::new(self.name)?,
            ServiceDescription::new(self.service)?,
            self.status.parse()?,
            timeline,
            self.created_at,
        )
    }
}
