use diesel::connection::SimpleConnection;

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new("test_creates_and_removes_db_files.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_connections_enforce_foreign_keys() {
    let test_db = common::TestDb::new("test_connections_enforce_foreign_keys.db");
    let mut conn = test_db.pool().get().unwrap();
    let orphan = conn.batch_execute(
        "INSERT INTO timeline_entries (client_id, position, recorded_on, label, description) \
         VALUES (999, 0, '2025-08-15', '15 de Agosto, 2025', 'Visita');",
    );
    assert!(orphan.is_err());
}
