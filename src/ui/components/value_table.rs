use dioxus::prelude::*;

use crate::domain::{AppState, ScoredItem, SortKey};

/// One rendered row: display strings plus the best-value flag.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueRow {
    pub id: String,
    pub cells: [String; 7],
    pub is_best: bool,
}

impl ValueRow {
    pub fn new(scored: &ScoredItem, is_best: bool) -> Self {
        let item = &scored.item;
        Self {
            id: item.id.to_string(),
            cells: [
                item.name.clone(),
                item.category.clone(),
                format_number(item.size),
                format!("${}", format_number(item.price)),
                format!("{}%", format_number(item.abv)),
                format!("{:.3}", scored.value_score),
                item.source_group_or_empty().to_string(),
            ],
            is_best,
        }
    }
}

/// Rows in display order with the best beer flagged.
pub fn build_rows(state: &AppState) -> Vec<ValueRow> {
    let best = state.best_item_id();
    state
        .sorted_view()
        .iter()
        .map(|scored| ValueRow::new(scored, best.as_ref() == Some(scored.id())))
        .collect()
}

pub fn header_label(state: &AppState, key: SortKey) -> String {
    let arrow = state.sort_indicator(key);
    if arrow.is_empty() {
        key.label().to_string()
    } else {
        format!("{} {arrow}", key.label())
    }
}

/// Whole numbers without a trailing ".0", everything else as given.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[component]
pub fn ValueTable() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let (rows, headers) = state.with(|st| {
        let headers = SortKey::ALL
            .iter()
            .map(|key| (*key, header_label(st, *key)))
            .collect::<Vec<_>>();
        (build_rows(st), headers)
    });
    let is_empty = rows.is_empty();

    rsx! {
        div { class: "table-scroll",
            table { class: "value-table",
                thead {
                    tr {
                        for (key, label) in headers {
                            th {
                                button {
                                    onclick: move |_| state.with_mut(|st| st.on_header_select(key)),
                                    "{label}"
                                }
                            }
                        }
                    }
                }
                tbody {
                    if is_empty {
                        tr {
                            td { class: "empty", colspan: "7", "No beers to show." }
                        }
                    }
                    for row in rows {
                        tr {
                            key: "{row.id}",
                            class: if row.is_best { "best-value" } else { "" },
                            for cell in row.cells.iter() {
                                td { "{cell}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
