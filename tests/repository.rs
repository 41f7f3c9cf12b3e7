use chrono::NaiveDateTime;
use service_tracker::domain::client::{Client, ClientStatus};
use service_tracker::domain::timeline::TimelineEntry;
use service_tracker::domain::types::{ClientId, StatusNote};
use service_tracker::repository::errors::RepositoryError;
use service_tracker::repository::{
    ClientReader, ClientWriter, DieselRepository, InMemoryRepository,
};

mod common;

use common::august;

fn entry(day: u32, note: &str) -> TimelineEntry {
    TimelineEntry::new(
        august(day),
        format!("{day} de Agosto, 2025"),
        StatusNote::new(note).unwrap(),
    )
}

fn created(hour: u32) -> NaiveDateTime {
    august(15).and_hms_opt(hour, 0, 0).unwrap()
}

fn open(name: &str, day: u32, hour: u32) -> Client {
    let first = entry(day, "Visita realizada para medição");
    Client::open(ClientId::new(), common::new_client(name, day), first, created(hour))
}

#[test]
fn test_client_repository_crud() {
    let test_db = common::TestDb::new("test_client_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let maria = open("Maria Oliveira", 15, 9);
    let carlos = open("Carlos Souza", 16, 10);
    repo.insert_client(&maria).unwrap();
    repo.insert_client(&carlos).unwrap();

    let listed = repo.list_clients().unwrap();
    assert_eq!(listed, vec![carlos.clone(), maria.clone()]);

    let mut updated = repo.get_client_by_id(maria.id()).unwrap().unwrap();
    updated.record_update(entry(18, "Reforma iniciada")).unwrap();
    updated.complete(entry(20, "Finalizado com sucesso")).unwrap();
    repo.replace_client(&updated).unwrap();

    let stored = repo.get_client_by_id(maria.id()).unwrap().unwrap();
    assert_eq!(stored, updated);
    assert_eq!(stored.status(), ClientStatus::Completed);
    assert_eq!(stored.display_date(), august(20));
    assert_eq!(stored.timeline().len(), 3);
    assert_eq!(stored.timeline()[2].description.as_str(), "Visita realizada para medição");

    repo.delete_client(maria.id()).unwrap();
    assert!(repo.get_client_by_id(maria.id()).unwrap().is_none());
    assert_eq!(repo.list_clients().unwrap(), vec![carlos]);
}

#[test]
fn test_unknown_ids_are_not_found() {
    let test_db = common::TestDb::new("test_unknown_ids_are_not_found.db");
    let repo = DieselRepository::new(test_db.pool());
    let ghost = open("Ana Costa", 15, 9);

    assert!(repo.get_client_by_id(ghost.id()).unwrap().is_none());
    assert!(matches!(
        repo.replace_client(&ghost),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.delete_client(ghost.id()),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_duplicate_insert_is_rejected() {
    let test_db = common::TestDb::new("test_duplicate_insert_is_rejected.db");
    let repo = DieselRepository::new(test_db.pool());
    let ana = open("Ana Costa", 15, 9);

    repo.insert_client(&ana).unwrap();
    assert!(repo.insert_client(&ana).is_err());
    assert_eq!(repo.list_clients().unwrap().len(), 1);
}

#[test]
fn test_timeline_cannot_shrink() {
    let test_db = common::TestDb::new("test_timeline_cannot_shrink.db");
    let repo = DieselRepository::new(test_db.pool());

    let shorter = open("Pedro Martins", 15, 9);
    let mut longer = shorter.clone();
    longer.record_update(entry(16, "Desenho do projeto iniciado")).unwrap();
    repo.insert_client(&longer).unwrap();

    assert!(matches!(
        repo.replace_client(&shorter),
        Err(RepositoryError::ConstraintViolation(_))
    ));
    assert_eq!(repo.get_client_by_id(shorter.id()).unwrap().unwrap(), longer);
}

#[test]
fn test_replace_all_keeps_snapshot_order() {
    let test_db = common::TestDb::new("test_replace_all_keeps_snapshot_order.db");
    let repo = DieselRepository::new(test_db.pool());

    let stale = open("Juliana Lima", 15, 8);
    repo.insert_client(&stale).unwrap();

    // Same timestamp on every record: order must come from the snapshot itself.
    let snapshot = vec![
        open("Maria Oliveira", 15, 9),
        open("Carlos Souza", 16, 9),
        open("Ana Costa", 17, 9),
    ];
    repo.replace_all(&snapshot).unwrap();

    assert_eq!(repo.list_clients().unwrap(), snapshot);
    assert!(repo.get_client_by_id(stale.id()).unwrap().is_none());

    repo.replace_all(&[]).unwrap();
    assert!(repo.list_clients().unwrap().is_empty());
}

#[test]
fn test_backends_agree_on_snapshot_order() {
    let test_db = common::TestDb::new("test_backends_agree_on_snapshot_order.db");
    let sqlite = DieselRepository::new(test_db.pool());
    let memory = InMemoryRepository::new();

    // Snapshot order runs against `created_at`.
    let snapshot = vec![open("Older", 15, 8), open("Newer", 16, 11)];
    sqlite.replace_all(&snapshot).unwrap();
    memory.replace_all(&snapshot).unwrap();

    let names = |clients: Vec<Client>| -> Vec<String> {
        clients.iter().map(|c| c.name().to_string()).collect()
    };
    assert_eq!(names(sqlite.list_clients().unwrap()), vec!["Older", "Newer"]);
    assert_eq!(names(memory.list_clients().unwrap()), vec!["Older", "Newer"]);

    let fresh = open("Fresh", 17, 6);
    sqlite.insert_client(&fresh).unwrap();
    memory.insert_client(&fresh).unwrap();
    assert_eq!(
        sqlite.list_clients().unwrap(),
        memory.list_clients().unwrap()
    );
    assert_eq!(sqlite.list_clients().unwrap()[0].id(), fresh.id());
}
