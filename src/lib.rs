#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::models::config::{ServerConfig, StorageBackend};
#[cfg(feature = "server")]
use crate::repository::{ClientRepository, DieselRepository, InMemoryRepository};
#[cfg(feature = "server")]
use crate::routes::api::{get_snapshot, put_snapshot};
#[cfg(feature = "server")]
use crate::routes::client::{
    add_timeline_update, complete_client, delete_client, save_client, show_client,
};
#[cfg(feature = "server")]
use crate::routes::main::{add_client, show_index};
#[cfg(feature = "server")]
use crate::services::ClientStore;

pub mod broadcast;
pub mod db;
pub mod domain;
pub mod dto;
mod error_conversions;
pub mod forms;
pub mod locale;
pub mod models;
pub mod projection;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
pub mod services;

/// Registers every JSON handler under `/api`.
#[cfg(feature = "server")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(show_index)
            .service(add_client)
            .service(show_client)
            .service(save_client)
            .service(add_timeline_update)
            .service(complete_client)
            .service(delete_client)
            .service(get_snapshot)
            .service(put_snapshot),
    );
}

/// Builds the client store selected by `server_config`.
#[cfg(feature = "server")]
pub fn build_store(server_config: &ServerConfig) -> std::io::Result<ClientStore> {
    let repo: Arc<dyn ClientRepository> = match server_config.backend {
        StorageBackend::Memory => Arc::new(InMemoryRepository::new()),
        StorageBackend::Sqlite => {
            // Establish Diesel connection pool for the SQLite database.
            let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
                std::io::Error::other(format!("Failed to establish database connection: {e}"))
            })?;
            Arc::new(DieselRepository::new(pool))
        }
    };

    Ok(ClientStore::new(repo).with_locale(server_config.locale.strategy()))
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let store = build_store(&server_config)?;
    log::info!(
        "Using {:?} backend with locale {}",
        server_config.backend,
        server_config.locale
    );

    if server_config.seed_demo_data {
        services::seed::seed_demo_data(&store)
            .map_err(|e| std::io::Error::other(format!("Failed to seed demo data: {e}")))?;
    }

    let store = web::Data::new(store);
    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(configure)
            .app_data(store.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
