//! Value score derivation: how much alcohol a dollar buys.

use tracing::warn;

use super::entities::{Item, RecordError, ScoredItem};

/// Result of scoring a batch: the usable rows in input order plus how many
/// were dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoredDataset {
    pub items: Vec<ScoredItem>,
    pub skipped: usize,
}

/// Annotates a valid item with `(abv * size) / 100 / price`.
pub fn score_item(item: Item) -> Result<ScoredItem, RecordError> {
    let item = item.normalized();
    item.validate()?;
    let value_score = alcohol_per_dollar(&item);
    Ok(ScoredItem { item, value_score })
}

fn alcohol_per_dollar(item: &Item) -> f64 {
    (item.abv * item.size) / 100.0 / item.price
}

/// Scores every item, excluding invalid ones instead of emitting a
/// non-numeric score.
pub fn score_items(items: Vec<Item>) -> ScoredDataset {
    let mut dataset = ScoredDataset {
        items: Vec::with_capacity(items.len()),
        skipped: 0,
    };

    for item in items {
        match score_item(item) {
            Ok(scored) => dataset.items.push(scored),
            Err(err) => {
                warn!("skipping beer: {err}");
                dataset.skipped += 1;
            }
        }
    }

    dataset
}
