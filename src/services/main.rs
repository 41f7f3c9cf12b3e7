use crate::domain::client::Client;
use crate::dto::main::IndexPageData;
pub use crate::dto::main::IndexQuery;
use crate::projection::{ClientCounters, ListQuery, project};
use crate::services::{ClientStore, ServiceResult};

/// Loads the clients list for the main index page.
pub fn load_index_page(store: &ClientStore, query: IndexQuery) -> ServiceResult<IndexPageData> {
    let clients = store.list_all().map_err(|err| {
        log::error!("Failed to list clients: {err}");
        err
    })?;
    Ok(build_index_page(&clients, query))
}

/// Applies tab and search to `clients`; counters always cover the whole set.
pub fn build_index_page(clients: &[Client], query: IndexQuery) -> IndexPageData {
    let tab = query.tab.unwrap_or_default();
    let mut list_query = ListQuery::new(tab);
    if let Some(term) = query.search {
        list_query = list_query.search(term);
    }

    IndexPageData {
        tab,
        clients: project(clients, &list_query),
        counters: ClientCounters::tally(clients),
        search_query: list_query.search,
    }
}
