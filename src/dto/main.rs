use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::dto::client::ClientView;
use crate::locale::DisplayLocale;
use crate::projection::{ClientCounters, ListTab};

/// Query parameters accepted by the list view.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Selected tab, `active` when absent.
    pub tab: Option<ListTab>,
    /// Optional search string entered by the user.
    pub search: Option<String>,
}

/// Data required to render the list view.
#[derive(Debug)]
pub struct IndexPageData {
    pub tab: ListTab,
    /// Clients of the selected tab, most recent first.
    pub clients: Vec<Client>,
    /// Counters over the whole collection.
    pub counters: ClientCounters,
    /// Search query echoed back when present.
    pub search_query: Option<String>,
}

/// JSON shape of [`IndexPageData`].
#[derive(Debug, Serialize)]
pub struct IndexView {
    pub tab: ListTab,
    pub search_query: Option<String>,
    pub counters: ClientCounters,
    pub clients: Vec<ClientView>,
}

impl IndexView {
    pub fn render(page: &IndexPageData, locale: &dyn DisplayLocale) -> Self {
        Self {
            tab: page.tab,
            search_query: page.search_query.clone(),
            counters: page.counters,
            clients: page
                .clients
                .iter()
                .map(|client| ClientView::render(client, locale))
                .collect(),
        }
    }
}
