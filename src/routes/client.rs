use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};

use crate::dto::client::ClientView;
use crate::forms::client::{AddUpdateForm, SaveClientForm};
use crate::routes::{error_response, parse_client_id};
use crate::services::ClientStore;
use crate::services::client as client_service;

#[get("/v1/clients/{client_id}")]
pub async fn show_client(
    client_id: web::Path<String>,
    store: web::Data<ClientStore>,
) -> impl Responder {
    let client_id = match parse_client_id(&client_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match client_service::show_client(&store, client_id) {
        Ok(client) => HttpResponse::Ok().json(ClientView::render(&client, store.locale())),
        Err(err) => error_response(&err),
    }
}

#[patch("/v1/clients/{client_id}")]
pub async fn save_client(
    client_id: web::Path<String>,
    store: web::Data<ClientStore>,
    web::Json(form): web::Json<SaveClientForm>,
) -> impl Responder {
    let client_id = match parse_client_id(&client_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match client_service::save_client(&store, client_id, form) {
        Ok(client) => HttpResponse::Ok().json(ClientView::render(&client, store.locale())),
        Err(err) => error_response(&err),
    }
}

#[post("/v1/clients/{client_id}/timeline")]
pub async fn add_timeline_update(
    client_id: web::Path<String>,
    store: web::Data<ClientStore>,
    web::Json(form): web::Json<AddUpdateForm>,
) -> impl Responder {
    let client_id = match parse_client_id(&client_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match client_service::add_timeline_update(&store, client_id, form) {
        Ok(client) => HttpResponse::Ok().json(ClientView::render(&client, store.locale())),
        Err(err) => error_response(&err),
    }
}

#[post("/v1/clients/{client_id}/complete")]
pub async fn complete_client(
    client_id: web::Path<String>,
    store: web::Data<ClientStore>,
) -> impl Responder {
    let client_id = match parse_client_id(&client_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match store.mark_completed(client_id) {
        Ok(client) => HttpResponse::Ok().json(ClientView::render(&client, store.locale())),
        Err(err) => {
            log::error!("Failed to complete client {client_id}: {err}");
            error_response(&err)
        }
    }
}

#[delete("/v1/clients/{client_id}")]
pub async fn delete_client(
    client_id: web::Path<String>,
    store: web::Data<ClientStore>,
) -> impl Responder {
    let client_id = match parse_client_id(&client_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match store.delete_client(client_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => {
            log::error!("Failed to delete client {client_id}: {err}");
            error_response(&err)
        }
    }
}
