//! Sync endpoints used by the backend that owns the authoritative collection.

use actix_web::{HttpResponse, Responder, get, put, web};

use crate::dto::snapshot::ClientDocument;
use crate::routes::error_response;
use crate::services::{ClientStore, ServiceError};

#[get("/v1/snapshot")]
pub async fn get_snapshot(store: web::Data<ClientStore>) -> impl Responder {
    match store.list_all() {
        Ok(clients) => {
            let documents: Vec<ClientDocument> = clients.iter().map(Into::into).collect();
            HttpResponse::Ok().json(documents)
        }
        Err(err) => {
            log::error!("Failed to load snapshot: {err}");
            error_response(&err)
        }
    }
}

#[put("/v1/snapshot")]
pub async fn put_snapshot(
    store: web::Data<ClientStore>,
    web::Json(documents): web::Json<Vec<ClientDocument>>,
) -> impl Responder {
    let clients = match documents
        .into_iter()
        .map(|doc| doc.into_domain(store.locale()))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(clients) => clients,
        Err(err) => {
            log::error!("Rejected remote snapshot: {err}");
            return error_response(&ServiceError::from(err));
        }
    };

    match store.apply_remote_snapshot(clients) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}
