use super::entities::{ItemId, ScoredItem};

/// Id of the highest-scoring beer. On ties the earliest item in `items` wins,
/// so callers should pass the dataset in provider order rather than a sorted
/// view.
pub fn best_item_id(items: &[ScoredItem]) -> Option<ItemId> {
    let mut best: Option<&ScoredItem> = None;
    for candidate in items {
        match best {
            Some(current) if candidate.value_score <= current.value_score => {}
            _ => best = Some(candidate),
        }
    }
    best.map(|item| item.id().clone())
}
