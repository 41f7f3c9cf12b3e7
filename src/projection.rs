//! List projection used by the dashboard: tab filter, search and counters.

use serde::{Deserialize, Serialize};

use crate::domain::client::{Client, ClientStatus};

/// Partition selected in the list view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListTab {
    #[default]
    Active,
    Completed,
}

impl ListTab {
    pub fn status(self) -> ClientStatus {
        match self {
            ListTab::Active => ClientStatus::Active,
            ListTab::Completed => ClientStatus::Completed,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub tab: ListTab,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(tab: ListTab) -> Self {
        Self { tab, search: None }
    }

    /// Blank search terms are ignored.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_string();
        self.search = (!term.is_empty()).then_some(term);
        self
    }
}

/// Totals over the unfiltered collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClientCounters {
    pub active: usize,
    pub completed: usize,
    pub total: usize,
}

impl ClientCounters {
    pub fn tally(clients: &[Client]) -> Self {
        let active = clients.iter().filter(|c| c.is_active()).count();
        let completed = clients
            .iter()
            .filter(|c| c.status() == ClientStatus::Completed)
            .count();
        Self {
            active,
            completed,
            total: active + completed,
        }
    }
}

/// Sorts by `display_date` (most recent first), keeps the selected tab and
/// applies a case-insensitive name search. Ties keep store order.
pub fn project(clients: &[Client], query: &ListQuery) -> Vec<Client> {
    let mut sorted: Vec<&Client> = clients.iter().collect();
    sorted.sort_by(|a, b| b.display_date().cmp(&a.display_date()));

    let status = query.tab.status();
    let needle = query.search.as_deref().map(str::to_lowercase);

    sorted
        .into_iter()
        .filter(|client| client.status() == status)
        .filter(|client| match &needle {
            Some(needle) => client.name().to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .cloned()
        .collect()
}
