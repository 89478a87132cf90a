//! Column sorting for the beer table.

use std::cmp::Ordering;

use super::entities::ScoredItem;

/// Sortable columns, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    Category,
    Size,
    Price,
    Abv,
    ValueScore,
    SourceGroup,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Name,
        SortKey::Category,
        SortKey::Size,
        SortKey::Price,
        SortKey::Abv,
        SortKey::ValueScore,
        SortKey::SourceGroup,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Category => "Type",
            Self::Size => "Size (oz)",
            Self::Price => "Price ($)",
            Self::Abv => "ABV (%)",
            Self::ValueScore => "Value Score",
            Self::SourceGroup => "Bar Name",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::ValueScore,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    /// Header selection: the active key flips direction, any other key starts
    /// ascending.
    pub fn select(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                key,
                direction: SortDirection::Ascending,
            }
        }
    }

    /// Arrow shown next to a column header, empty for inactive columns.
    pub fn indicator(&self, key: SortKey) -> &'static str {
        if self.key == key {
            self.direction.arrow()
        } else {
            ""
        }
    }
}

/// Three-way comparison on one column.
///
/// Text compares by code point; a missing bar name compares as "". Numbers
/// use a total order so the comparator stays consistent for any input.
pub fn compare_by_key(a: &ScoredItem, b: &ScoredItem, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.item.name.cmp(&b.item.name),
        SortKey::Category => a.item.category.cmp(&b.item.category),
        SortKey::Size => a.item.size.total_cmp(&b.item.size),
        SortKey::Price => a.item.price.total_cmp(&b.item.price),
        SortKey::Abv => a.item.abv.total_cmp(&b.item.abv),
        SortKey::ValueScore => a.value_score.total_cmp(&b.value_score),
        SortKey::SourceGroup => a
            .item
            .source_group_or_empty()
            .cmp(b.item.source_group_or_empty()),
    }
}

/// Returns a sorted copy of `items`. Equal keys keep their input order in
/// both directions.
pub fn sorted_view(items: &[ScoredItem], state: SortState) -> Vec<ScoredItem> {
    let mut view = items.to_vec();
    view.sort_by(|a, b| {
        let ord = compare_by_key(a, b, state.key);
        match state.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{sample_item, Item};
    use crate::domain::scoring::score_item;

    fn scored(item: Item) -> ScoredItem {
        score_item(item).unwrap()
    }

    fn ids(items: &[ScoredItem]) -> Vec<&str> {
        items.iter().map(|s| s.id().as_str()).collect()
    }

    fn dataset() -> Vec<ScoredItem> {
        let mut a = sample_item("a", 5.0, 12.0, 3.0);
        a.name = "Pilsner".into();
        a.source_group = Some("Tap Room".into());
        let mut b = sample_item("b", 9.0, 12.0, 7.0);
        b.name = "Double IPA".into();
        b.category = "IPA".into();
        let mut c = sample_item("c", 4.2, 16.0, 4.0);
        c.name = "Mild".into();
        c.category = "Ale".into();
        c.source_group = Some("Anchor".into());
        vec![scored(a), scored(b), scored(c)]
    }

    #[test]
    fn starts_on_value_score_descending() {
        let state = SortState::default();
        assert_eq!(state.key, SortKey::ValueScore);
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn repeated_selection_toggles_direction() {
        let first = SortState::default().select(SortKey::Price);
        assert_eq!(first.direction, SortDirection::Ascending);
        let second = first.select(SortKey::Price);
        assert_eq!(second.direction, SortDirection::Descending);
        let third = second.select(SortKey::Price);
        assert_eq!(third.direction, SortDirection::Ascending);
    }

    #[test]
    fn new_key_resets_to_ascending() {
        let state = SortState::default()
            .select(SortKey::Name)
            .select(SortKey::Name)
            .select(SortKey::Abv);
        assert_eq!(state.key, SortKey::Abv);
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn indicator_only_on_active_column() {
        let state = SortState::default();
        assert_eq!(state.indicator(SortKey::ValueScore), "↓");
        assert_eq!(state.indicator(SortKey::Name), "");
        assert_eq!(state.select(SortKey::Name).indicator(SortKey::Name), "↑");
    }

    #[test]
    fn sorts_text_and_numbers() {
        let items = dataset();
        let by_name = SortState::default().select(SortKey::Name);
        assert_eq!(ids(&sorted_view(&items, by_name)), ["b", "c", "a"]);

        let by_price_desc = SortState::default()
            .select(SortKey::Price)
            .select(SortKey::Price);
        assert_eq!(ids(&sorted_view(&items, by_price_desc)), ["b", "c", "a"]);

        let by_abv = SortState::default().select(SortKey::Abv);
        assert_eq!(ids(&sorted_view(&items, by_abv)), ["c", "a", "b"]);
    }

    #[test]
    fn missing_bar_name_sorts_as_empty() {
        let items = dataset();
        let by_bar = SortState::default().select(SortKey::SourceGroup);
        assert_eq!(ids(&sorted_view(&items, by_bar)), ["b", "c", "a"]);
    }

    #[test]
    fn does_not_mutate_input() {
        let items = dataset();
        let before = items.clone();
        let _ = sorted_view(&items, SortState::default().select(SortKey::Name));
        assert_eq!(items, before);
    }

    #[test]
    fn resorting_is_idempotent() {
        let items = dataset();
        for key in SortKey::ALL {
            for state in [SortState::default().select(key), SortState::default().select(key).select(key)] {
                let once = sorted_view(&items, state);
                let twice = sorted_view(&once, state);
                assert_eq!(once, twice, "{key:?} {:?}", state.direction);
            }
        }
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let items = vec![
            scored(sample_item("first", 5.0, 12.0, 3.0)),
            scored(sample_item("second", 7.5, 16.0, 6.0)),
            scored(sample_item("third", 5.0, 12.0, 3.0)),
        ];

        let by_category = SortState::default().select(SortKey::Category);
        assert_eq!(ids(&sorted_view(&items, by_category)), ["first", "second", "third"]);
        assert_eq!(
            ids(&sorted_view(&items, by_category.select(SortKey::Category))),
            ["first", "second", "third"]
        );

        let by_score_desc = SortState::default();
        assert_eq!(ids(&sorted_view(&items, by_score_desc)), ["first", "second", "third"]);
    }

    #[test]
    fn negative_zero_ties_with_zero() {
        let dataset = crate::domain::scoring::score_items(vec![
            sample_item("a", 0.0, 12.0, 3.0),
            sample_item("b", -0.0, 12.0, 3.0),
        ]);
        assert_eq!(dataset.skipped, 0);

        let by_abv = SortState::default().select(SortKey::Abv);
        assert_eq!(ids(&sorted_view(&dataset.items, by_abv)), ["a", "b"]);

        let by_score = SortState::default().select(SortKey::ValueScore);
        let view = sorted_view(&dataset.items, by_score);
        assert_eq!(ids(&view), ["a", "b"]);
        assert!(view.iter().all(|s| format!("{:.3}", s.value_score) == "0.000"));
    }

    #[test]
    fn empty_and_single_element() {
        for state in [SortState::default(), SortState::default().select(SortKey::Name)] {
            assert!(sorted_view(&[], state).is_empty());
        }

        let single = vec![scored(sample_item("only", 5.0, 12.0, 3.0))];
        assert_eq!(sorted_view(&single, SortState::default()), single);
        assert_eq!(sorted_view(&single, SortState::default().select(SortKey::ValueScore)), single);
    }
}
