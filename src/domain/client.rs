use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::timeline::TimelineEntry;
use crate::domain::types::{
    ClientId, ClientName, ServiceDescription, StatusNote, TypeConstraintError,
};

/// Lifecycle state of a client record. Transitions only go forward.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Active,
    Completed,
}

impl ClientStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ClientStatus::Active => "active",
            ClientStatus::Completed => "completed",
        }
    }
}

impl Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(ClientStatus::Active),
            "completed" => Ok(ClientStatus::Completed),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown client status `{other}`"
            ))),
        }
    }
}

/// Rejected lifecycle transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientStateError {
    #[error("client {0} is already completed")]
    AlreadyCompleted(ClientId),
    #[error("client {0} is still active")]
    NotCompleted(ClientId),
}

/// A tracked customer together with the contracted service and its history.
///
/// The timeline is ordered newest first and is never empty; `display_date`
/// always mirrors the date of its head entry.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Client {
    id: ClientId,
    name: ClientName,
    service: ServiceDescription,
    status: ClientStatus,
    display_date: NaiveDate,
    timeline: Vec<TimelineEntry>,
    created_at: NaiveDateTime,
}

impl Client {
    /// Opens a new active record seeded with exactly one timeline entry.
    #[must_use]
    pub fn open(
        id: ClientId,
        new_client: NewClient,
        first_entry: TimelineEntry,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name: new_client.name,
            service: new_client.service,
            status: ClientStatus::Active,
            display_date: first_entry.recorded_on,
            timeline: vec![first_entry],
            created_at,
        }
    }

    /// Rebuilds a record loaded from storage or pushed by a remote backend.
    ///
    /// `timeline` must be ordered newest first.
    pub fn try_from_parts(
        id: ClientId,
        name: ClientName,
        service: ServiceDescription,
        status: ClientStatus,
        timeline: Vec<TimelineEntry>,
        created_at: NaiveDateTime,
    ) -> Result<Self, TypeConstraintError> {
        let display_date = timeline
            .first()
            .map(|entry| entry.recorded_on)
            .ok_or_else(|| {
                TypeConstraintError::InvalidValue(format!("client {id} has an empty timeline"))
            })?;

        Ok(Self {
            id,
            name,
            service,
            status,
            display_date,
            timeline,
            created_at,
        })
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Raw identifier bytes borrowed from the record (DB boundary).
    pub fn id_bytes(&self) -> &[u8; 16] {
        self.id.as_bytes()
    }

    pub fn name(&self) -> &ClientName {
        &self.name
    }

    pub fn service(&self) -> &ServiceDescription {
        &self.service
    }

    pub fn status(&self) -> ClientStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }

    pub fn display_date(&self) -> NaiveDate {
        self.display_date
    }

    /// History of the record, newest entry first.
    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Prepends a status note. Only active records accept notes.
    pub fn record_update(&mut self, entry: TimelineEntry) -> Result<(), ClientStateError> {
        self.ensure_active()?;
        self.prepend(entry);
        Ok(())
    }

    /// Prepends the completion entry and closes the record.
    pub fn complete(&mut self, entry: TimelineEntry) -> Result<(), ClientStateError> {
        self.ensure_active()?;
        self.prepend(entry);
        self.status = ClientStatus::Completed;
        Ok(())
    }

    /// Replaces the provided fields. Returns whether anything changed.
    pub fn apply_update(&mut self, updates: &UpdateClient) -> Result<bool, ClientStateError> {
        self.ensure_active()?;
        let mut changed = false;
        if let Some(name) = &updates.name
            && *name != self.name
        {
            self.name = name.clone();
            changed = true;
        }
        if let Some(service) = &updates.service
            && *service != self.service
        {
            self.service = service.clone();
            changed = true;
        }
        Ok(changed)
    }

    /// Only completed records may be removed.
    pub fn ensure_deletable(&self) -> Result<(), ClientStateError> {
        match self.status {
            ClientStatus::Completed => Ok(()),
            ClientStatus::Active => Err(ClientStateError::NotCompleted(self.id)),
        }
    }

    fn ensure_active(&self) -> Result<(), ClientStateError> {
        match self.status {
            ClientStatus::Active => Ok(()),
            ClientStatus::Completed => Err(ClientStateError::AlreadyCompleted(self.id)),
        }
    }

    fn prepend(&mut self, entry: TimelineEntry) {
        self.display_date = entry.recorded_on;
        self.timeline.insert(0, entry);
    }
}

/// Validated input of the creation form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewClient {
    pub name: ClientName,
    pub service: ServiceDescription,
    pub start_date: NaiveDate,
    pub initial_note: StatusNote,
}

impl NewClient {
    pub fn try_new(
        name: impl Into<String>,
        service: impl Into<String>,
        start_date: NaiveDate,
        initial_note: impl Into<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: ClientName::new(name)?,
            service: ServiceDescription::new(service)?,
            start_date,
            initial_note: StatusNote::new(initial_note)?,
        })
    }
}

/// Partial edit of the descriptive fields. Absent fields stay untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateClient {
    pub name: Option<ClientName>,
    pub service: Option<ServiceDescription>,
}

impl UpdateClient {
    /// Provided values must not be blank.
    pub fn try_new(
        name: Option<String>,
        service: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: name.map(ClientName::new).transpose()?,
            service: service.map(ServiceDescription::new).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.service.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    fn entry(d: u32, text: &str) -> TimelineEntry {
        TimelineEntry::new(day(d), format!("{d} de Agosto, 2025"), StatusNote::new(text).unwrap())
    }

    fn opened() -> Client {
        let new_client =
            NewClient::try_new("Maria Oliveira", "Reforma de Cozinha", day(15), "Visita realizada")
                .unwrap();
        let first = entry(15, "Visita realizada");
        Client::open(ClientId::new(), new_client, first, day(15).and_hms_opt(9, 0, 0).unwrap())
    }

    #[test]
    fn open_seeds_single_entry() {
        let client = opened();
        assert_eq!(client.status(), ClientStatus::Active);
        assert_eq!(client.timeline().len(), 1);
        assert_eq!(client.display_date(), client.timeline()[0].recorded_on);
    }

    #[test]
    fn record_update_prepends_and_moves_display_date() {
        let mut client = opened();
        client.record_update(entry(18, "Reforma iniciada")).unwrap();
        assert_eq!(client.timeline().len(), 2);
        assert_eq!(client.timeline()[0].description.as_str(), "Reforma iniciada");
        assert_eq!(client.display_date(), day(18));
    }

    #[test]
    fn complete_is_one_way() {
        let mut client = opened();
        client.complete(entry(20, "Finalizado com sucesso")).unwrap();
        assert_eq!(client.status(), ClientStatus::Completed);
        assert_eq!(client.display_date(), day(20));

        let id = client.id();
        assert_eq!(
            client.complete(entry(21, "Finalizado com sucesso")),
            Err(ClientStateError::AlreadyCompleted(id))
        );
        assert_eq!(
            client.record_update(entry(21, "Outra nota")),
            Err(ClientStateError::AlreadyCompleted(id))
        );
        assert_eq!(client.timeline().len(), 2);
    }

    #[test]
    fn apply_update_touches_only_provided_fields() {
        let mut client = opened();
        let updates = UpdateClient::try_new(None, Some("Reforma de Banheiro".into())).unwrap();
        assert!(client.apply_update(&updates).unwrap());
        assert_eq!(client.name().as_str(), "Maria Oliveira");
        assert_eq!(client.service().as_str(), "Reforma de Banheiro");
        assert_eq!(client.timeline().len(), 1);
        assert!(!client.apply_update(&updates).unwrap());
    }

    #[test]
    fn update_rejects_blank_values() {
        assert!(UpdateClient::try_new(Some("  ".into()), None).is_err());
        assert!(UpdateClient::try_new(None, None).unwrap().is_empty());
    }

    #[test]
    fn only_completed_records_are_deletable() {
        let mut client = opened();
        assert!(client.ensure_deletable().is_err());
        client.complete(entry(20, "Finalizado com sucesso")).unwrap();
        assert!(client.ensure_deletable().is_ok());
    }

    #[test]
    fn parts_require_a_timeline() {
        let result = Client::try_from_parts(
            ClientId::new(),
            ClientName::new("Ana Costa").unwrap(),
            ServiceDescription::new("Pintura de Fachada").unwrap(),
            ClientStatus::Completed,
            Vec::new(),
            day(1).and_hms_opt(0, 0, 0).unwrap(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn status_parses_from_text() {
        assert_eq!("active".parse::<ClientStatus>(), Ok(ClientStatus::Active));
        assert_eq!(ClientStatus::Completed.to_string(), "completed");
        assert!("ativo".parse::<ClientStatus>().is_err());
    }
}
