//! Form-driven client operations used by the HTTP adapter.

use validator::Validate;

use crate::domain::client::{Client, UpdateClient};
use crate::domain::types::ClientId;
use crate::forms::client::{AddUpdateForm, SaveClientForm};
use crate::forms::main::AddClientForm;
use crate::services::{ClientStore, ServiceError, ServiceResult};

/// Validates the add-client form and opens a new record.
pub fn add_client(store: &ClientStore, form: AddClientForm) -> ServiceResult<Client> {
    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Validation(err.to_string()));
    }

    let new_client = form.to_new_client(store.locale()).map_err(|err| {
        log::error!("Failed to build client from form: {err}");
        ServiceError::from(err)
    })?;

    store.create(new_client)
}

/// Fetches a client, treating absence as [`ServiceError::NotFound`].
pub fn show_client(store: &ClientStore, id: ClientId) -> ServiceResult<Client> {
    store.get_by_id(id)?.ok_or(ServiceError::NotFound)
}

pub fn save_client(
    store: &ClientStore,
    id: ClientId,
    form: SaveClientForm,
) -> ServiceResult<Client> {
    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Validation(err.to_string()));
    }

    let updates = UpdateClient::try_from(form).map_err(|err| {
        log::error!("Failed to build client updates: {err}");
        ServiceError::from(err)
    })?;

    store.update_fields(id, &updates).map_err(|err| {
        log::error!("Failed to update client {id}: {err}");
        err
    })
}

pub fn add_timeline_update(
    store: &ClientStore,
    id: ClientId,
    form: AddUpdateForm,
) -> ServiceResult<Client> {
    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Validation(err.to_string()));
    }

    store.append_timeline_update(id, &form.text).map_err(|err| {
        log::error!("Failed to add timeline update to client {id}: {err}");
        err
    })
}
