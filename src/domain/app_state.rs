use tracing::{debug, warn};

use super::entities::{Item, ItemId, ScoredItem};
use super::scoring::score_items;
use super::selection::best_item_id;
use super::sorting::{sorted_view, SortKey, SortState};

/// Where the current fetch stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Pending,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }
}

/// Issued when a fetch starts; only the most recent ticket may update the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// What happened to a settled fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { rows: usize, skipped: usize },
    Failed(String),
    Discarded,
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Scored beers in provider order.
    pub dataset: Vec<ScoredItem>,
    pub sort: SortState,
    pub load: LoadState,
    /// Rows dropped by the last applied fetch (boundary rejects plus scoring rejects).
    pub skipped: usize,
    generation: u64,
}

impl AppState {
    pub fn sorted_view(&self) -> Vec<ScoredItem> {
        sorted_view(&self.dataset, self.sort)
    }

    pub fn best_item_id(&self) -> Option<ItemId> {
        best_item_id(&self.dataset)
    }

    pub fn on_header_select(&mut self, key: SortKey) {
        self.sort = self.sort.select(key);
        debug!(?key, direction = ?self.sort.direction, "sort changed");
    }

    pub fn sort_indicator(&self, key: SortKey) -> &'static str {
        self.sort.indicator(key)
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.load = LoadState::Pending;
        FetchTicket(self.generation)
    }

    fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Replaces the dataset with freshly fetched items. `rejected` counts rows
    /// the provider already refused before they became items.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        items: Vec<Item>,
        rejected: usize,
    ) -> FetchOutcome {
        if !self.is_current(ticket) {
            warn!(ticket = ticket.0, latest = self.generation, "discarding stale beer list");
            return FetchOutcome::Discarded;
        }

        let scored = score_items(items);
        self.dataset = scored.items;
        self.skipped = scored.skipped + rejected;
        self.load = LoadState::Ready;

        FetchOutcome::Applied {
            rows: self.dataset.len(),
            skipped: self.skipped,
        }
    }

    /// Records a failed fetch. The previous dataset stays on screen.
    pub fn fail_fetch(&mut self, ticket: FetchTicket, message: impl Into<String>) -> FetchOutcome {
        if !self.is_current(ticket) {
            return FetchOutcome::Discarded;
        }
        let message = message.into();
        warn!("beer fetch failed: {message}");
        self.load = LoadState::Failed(message.clone());
        FetchOutcome::Failed(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::sample_item;
    use crate::domain::sorting::SortDirection;

    fn ids(items: &[ScoredItem]) -> Vec<&str> {
        items.iter().map(|s| s.id().as_str()).collect()
    }

    #[test]
    fn fresh_state_is_empty() {
        let state = AppState::default();
        assert!(state.sorted_view().is_empty());
        assert_eq!(state.best_item_id(), None);
        assert_eq!(state.load, LoadState::Idle);
    }

    #[test]
    fn loaded_view_defaults_to_best_value_first() {
        let mut state = AppState::default();
        let ticket = state.begin_fetch();
        assert!(state.load.is_pending());

        let outcome = state.complete_fetch(
            ticket,
            vec![
                sample_item("cheap", 4.0, 12.0, 6.0),
                sample_item("strong", 9.0, 16.0, 5.0),
                sample_item("free", 5.0, 12.0, 0.0),
            ],
            1,
        );

        assert_eq!(outcome, FetchOutcome::Applied { rows: 2, skipped: 2 });
        assert_eq!(state.load, LoadState::Ready);
        assert_eq!(ids(&state.sorted_view()), ["strong", "cheap"]);
        assert_eq!(state.best_item_id(), Some(ItemId::new("strong")));
    }

    #[test]
    fn header_clicks_toggle_and_reorder() {
        let mut state = AppState::default();
        let ticket = state.begin_fetch();
        state.complete_fetch(
            ticket,
            vec![
                sample_item("a", 4.0, 12.0, 6.0),
                sample_item("b", 9.0, 16.0, 5.0),
            ],
            0,
        );

        state.on_header_select(SortKey::ValueScore);
        assert_eq!(state.sort.direction, SortDirection::Ascending);
        assert_eq!(ids(&state.sorted_view()), ["a", "b"]);
        assert_eq!(state.sort_indicator(SortKey::ValueScore), "↑");

        state.on_header_select(SortKey::ValueScore);
        assert_eq!(ids(&state.sorted_view()), ["b", "a"]);

        // The best row does not depend on the view order.
        assert_eq!(state.best_item_id(), Some(ItemId::new("b")));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = AppState::default();
        let old = state.begin_fetch();
        let new = state.begin_fetch();

        state.complete_fetch(new, vec![sample_item("new", 5.0, 12.0, 3.0)], 0);
        let outcome = state.complete_fetch(old, vec![sample_item("old", 5.0, 12.0, 3.0)], 0);

        assert_eq!(outcome, FetchOutcome::Discarded);
        assert_eq!(ids(&state.dataset), ["new"]);
        assert_eq!(state.fail_fetch(old, "late failure"), FetchOutcome::Discarded);
        assert_eq!(state.load, LoadState::Ready);
    }

    #[test]
    fn failure_keeps_previous_dataset() {
        let mut state = AppState::default();
        let first = state.begin_fetch();
        state.complete_fetch(first, vec![sample_item("kept", 5.0, 12.0, 3.0)], 0);

        let second = state.begin_fetch();
        let outcome = state.fail_fetch(second, "network down");

        assert_eq!(outcome, FetchOutcome::Failed("network down".to_string()));
        assert_eq!(state.load, LoadState::Failed("network down".to_string()));
        assert_eq!(ids(&state.dataset), ["kept"]);
        assert_eq!(state.best_item_id(), Some(ItemId::new("kept")));
    }

    #[test]
    fn sort_survives_reload() {
        let mut state = AppState::default();
        state.on_header_select(SortKey::Name);
        let ticket = state.begin_fetch();
        state.complete_fetch(ticket, vec![sample_item("z", 5.0, 12.0, 3.0)], 0);
        assert_eq!(state.sort.key, SortKey::Name);
    }
}
