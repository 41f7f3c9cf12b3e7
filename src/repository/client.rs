use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::client::Client;
use crate::domain::timeline::TimelineEntry;
use crate::domain::types::ClientId;
use crate::models::client::{
    Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
};
use crate::models::timeline_entry::{NewTimelineEntry, TimelineEntry as DbTimelineEntry};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, DieselRepository};
use crate::schema::{clients, timeline_entries};

fn find_row_id(conn: &mut SqliteConnection, id: ClientId) -> RepositoryResult<Option<i32>> {
    let row_id = clients::table
        .filter(clients::public_id.eq(id.as_bytes().as_slice()))
        .select(clients::id)
        .first::<i32>(conn)
        .optional()?;
    Ok(row_id)
}

/// Inserts the entries of `timeline` (newest first) that are not stored yet.
///
/// Stored entries are always the oldest `stored` ones, so only the head of
/// the timeline is written.
fn append_entries(
    conn: &mut SqliteConnection,
    client_id: i32,
    stored: usize,
    timeline: &[TimelineEntry],
) -> RepositoryResult<()> {
    let total = timeline.len();
    if stored > total {
        return Err(RepositoryError::ConstraintViolation(format!(
            "timeline of client row {client_id} cannot shrink from {stored} to {total} entries"
        )));
    }

    let new_entries: Vec<NewTimelineEntry> = timeline[..total - stored]
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            NewTimelineEntry::from_domain(client_id, (total - 1 - index) as i32, entry)
        })
        .collect();

    if !new_entries.is_empty() {
        diesel::insert_into(timeline_entries::table)
            .values(&new_entries)
            .execute(conn)?;
    }
    Ok(())
}

fn insert_row(
    conn: &mut SqliteConnection,
    client: &Client,
    now: NaiveDateTime,
) -> RepositoryResult<()> {
    let row_id = diesel::insert_into(clients::table)
        .values(&DbNewClient::from_domain(client, now))
        .returning(clients::id)
        .get_result::<i32>(conn)?;
    append_entries(conn, row_id, 0, client.timeline())
}

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        let mut conn = self.pool.get()?;

        let row = clients::table
            .filter(clients::public_id.eq(id.as_bytes().as_slice()))
            .select(DbClient::as_select())
            .first::<DbClient>(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let entries = DbTimelineEntry::belonging_to(&row)
            .select(DbTimelineEntry::as_select())
            .order(timeline_entries::position.desc())
            .load::<DbTimelineEntry>(&mut conn)?;

        Ok(Some(row.into_domain(entries)?))
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        let mut conn = self.pool.get()?;

        // Row ids grow with every insert, so this is newest-inserted first.
        let rows = clients::table
            .order(clients::id.desc())
            .select(DbClient::as_select())
            .load::<DbClient>(&mut conn)?;

        let entries = DbTimelineEntry::belonging_to(&rows)
            .select(DbTimelineEntry::as_select())
            .order(timeline_entries::position.desc())
            .load::<DbTimelineEntry>(&mut conn)?;

        let grouped = entries.grouped_by(&rows);

        rows.into_iter()
            .zip(grouped)
            .map(|(row, entries)| row.into_domain(entries).map_err(RepositoryError::from))
            .collect()
    }
}

impl ClientWriter for DieselRepository {
    fn insert_client(&self, client: &Client) -> RepositoryResult<()> {
        let mut conn = self.pool.get()?;
        let now = Utc::now().naive_utc();

        conn.transaction::<_, RepositoryError, _>(|conn| insert_row(conn, client, now))
    }

    fn replace_client(&self, client: &Client) -> RepositoryResult<()> {
        let mut conn = self.pool.get()?;
        let now = Utc::now().naive_utc();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row_id = find_row_id(conn, client.id())?.ok_or(RepositoryError::NotFound)?;

            diesel::update(clients::table.find(row_id))
                .set(&DbUpdateClient::from_domain(client, now))
                .execute(conn)?;

            let stored: i64 = timeline_entries::table
                .filter(timeline_entries::client_id.eq(row_id))
                .count()
                .get_result(conn)?;

            append_entries(conn, row_id, stored as usize, client.timeline())
        })
    }

    fn delete_client(&self, id: ClientId) -> RepositoryResult<()> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row_id = find_row_id(conn, id)?.ok_or(RepositoryError::NotFound)?;

            diesel::delete(timeline_entries::table.filter(timeline_entries::client_id.eq(row_id)))
                .execute(conn)?;
            diesel::delete(clients::table.find(row_id)).execute(conn)?;
            Ok(())
        })
    }

    fn replace_all(&self, snapshot: &[Client]) -> RepositoryResult<()> {
        let mut conn = self.pool.get()?;
        let now = Utc::now().naive_utc();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(timeline_entries::table).execute(conn)?;
            diesel::delete(clients::table).execute(conn)?;

            // Last record first so the snapshot head gets the highest row id.
            for client in snapshot.iter().rev() {
                insert_row(conn, client, now)?;
            }
            Ok(())
        })
    }
}
