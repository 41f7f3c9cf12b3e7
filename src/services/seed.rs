//! Sample clients loaded into an empty collection at startup.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::domain::client::{Client, ClientStatus};
use crate::domain::timeline::{COMPLETED_ICON, CREATED_ICON, TimelineEntry};
use crate::domain::types::{ClientId, ClientName, ServiceDescription, StatusNote, TimelineIcon};
use crate::locale::DisplayLocale;
use crate::services::{ClientStore, ServiceError, ServiceResult};

struct DemoClient {
    name: &'static str,
    service: &'static str,
    /// Oldest first: `(day of August 2025, note)`.
    history: &'static [(u32, &'static str)],
    /// Day the record was closed, if it was.
    completed_on: Option<u32>,
}

const OPENING: [(u32, &str); 3] = [
    (15, "Visita realizada para medição"),
    (16, "Desenho do projeto iniciado"),
    (18, "Reforma iniciada"),
];

const DEMO_CLIENTS: [DemoClient; 5] = [
    DemoClient {
        name: "Maria Oliveira",
        service: "Reforma de Cozinha",
        history: &OPENING,
        completed_on: None,
    },
    DemoClient {
        name: "Carlos Souza",
        service: "Instalação Elétrica",
        history: &[
            (15, "Visita realizada para medição"),
            (16, "Desenho do projeto iniciado"),
            (18, "Projeto enviado para aprovação"),
            (20, "Início das instalações"),
        ],
        completed_on: None,
    },
    DemoClient {
        name: "Ana Costa",
        service: "Pintura de Fachada",
        history: &OPENING,
        completed_on: Some(28),
    },
    DemoClient {
        name: "Pedro Martins",
        service: "Marcenaria Completa",
        history: &[
            (15, "Visita realizada para medição"),
            (16, "Desenho do projeto iniciado"),
            (18, "Reforma iniciada"),
            (24, "Início do corte dos móveis"),
        ],
        completed_on: None,
    },
    DemoClient {
        name: "Juliana Lima",
        service: "Consultoria de Design",
        history: &OPENING,
        completed_on: Some(26),
    },
];

fn august(day: u32) -> ServiceResult<NaiveDate> {
    NaiveDate::from_ymd_opt(2025, 8, day)
        .ok_or_else(|| ServiceError::Internal(format!("invalid demo day {day}")))
}

fn entry(locale: &dyn DisplayLocale, day: u32, note: &str) -> ServiceResult<TimelineEntry> {
    let date = august(day)?;
    Ok(TimelineEntry::new(date, locale.long_date(date), StatusNote::new(note)?))
}

/// Builds the sample collection, first record first.
///
/// `created_at` is staggered backwards from `now` so every backend lists the
/// records in the same order.
pub fn demo_clients(locale: &dyn DisplayLocale, now: NaiveDateTime) -> ServiceResult<Vec<Client>> {
    DEMO_CLIENTS
        .iter()
        .enumerate()
        .map(|(index, demo)| -> ServiceResult<Client> {
            let mut timeline = Vec::with_capacity(demo.history.len() + 1);
            for (position, (day, note)) in demo.history.iter().enumerate() {
                let mut item = entry(locale, *day, note)?;
                if position == 0 {
                    item = item.with_icon(TimelineIcon::new(CREATED_ICON)?);
                }
                timeline.push(item);
            }

            let status = match demo.completed_on {
                Some(day) => {
                    timeline.push(
                        entry(locale, day, locale.completion_note())?
                            .with_icon(TimelineIcon::new(COMPLETED_ICON)?),
                    );
                    ClientStatus::Completed
                }
                None => ClientStatus::Active,
            };
            timeline.reverse();

            Ok(Client::try_from_parts(
                ClientId::new(),
                ClientName::new(demo.name)?,
                ServiceDescription::new(demo.service)?,
                status,
                timeline,
                now - Duration::minutes(index as i64),
            )?)
        })
        .collect()
}

/// Loads the sample clients when the collection is empty.
///
/// Returns the number of records written.
pub fn seed_demo_data(store: &ClientStore) -> ServiceResult<usize> {
    let clients = demo_clients(store.locale(), store.clock().now())?;
    let count = clients.len();
    if !store.apply_remote_snapshot_if_empty(clients)? {
        log::info!("Skipping demo data: collection is not empty");
        return Ok(0);
    }
    log::info!("Seeded {count} demo clients");
    Ok(count)
}
