//! Domain logic for scoring and ordering beers lives here.

pub mod app_state;
pub mod entities;
pub mod scoring;
pub mod selection;
pub mod sorting;

#[allow(unused_imports)]
pub use app_state::{AppState, FetchOutcome, FetchTicket, LoadState};
#[allow(unused_imports)]
pub use entities::{Item, ItemId, RecordError, ScoredItem};
#[allow(unused_imports)]
pub use scoring::{score_item, score_items, ScoredDataset};
#[allow(unused_imports)]
pub use selection::best_item_id;
#[allow(unused_imports)]
pub use sorting::{compare_by_key, sorted_view, SortDirection, SortKey, SortState};
