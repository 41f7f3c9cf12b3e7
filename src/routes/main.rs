use actix_web::{HttpResponse, Responder, get, post, web};

use crate::dto::client::ClientView;
use crate::dto::main::IndexView;
use crate::forms::main::AddClientForm;
use crate::routes::error_response;
use crate::services::ClientStore;
use crate::services::client as client_service;
use crate::services::main::{IndexQuery, load_index_page};

#[get("/v1/clients")]
pub async fn show_index(
    params: web::Query<IndexQuery>,
    store: web::Data<ClientStore>,
) -> impl Responder {
    match load_index_page(&store, params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(IndexView::render(&page, store.locale())),
        Err(err) => error_response(&err),
    }
}

#[post("/v1/clients")]
pub async fn add_client(
    store: web::Data<ClientStore>,
    web::Json(form): web::Json<AddClientForm>,
) -> impl Responder {
    match client_service::add_client(&store, form) {
        Ok(client) => HttpResponse::Created().json(ClientView::render(&client, store.locale())),
        Err(err) => error_response(&err),
    }
}
