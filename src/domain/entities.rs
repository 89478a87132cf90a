use std::fmt;

use thiserror::Error;

/// Stable identifier of a beer row. Numeric ids from the store are kept as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A beer as served at a bar, exactly as the provider reported it.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Beer style ("type" column in the store).
    pub category: String,
    /// Serving size in fluid ounces.
    pub size: f64,
    pub price: f64,
    /// Alcohol by volume, in percent.
    pub abv: f64,
    /// Bar serving this beer, if the join returned one.
    pub source_group: Option<String>,
}

impl Item {
    /// Folds `-0.0` into `0.0` so equal quantities compare equal under a total order.
    pub fn normalized(mut self) -> Self {
        self.size += 0.0;
        self.price += 0.0;
        self.abv += 0.0;
        self
    }

    /// Checks the numeric fields against the scoring preconditions.
    ///
    /// Price must be strictly positive, size and abv non-negative, abv at most
    /// 100 and every number finite. Anything else cannot produce a usable
    /// value score and is rejected.
    pub fn validate(&self) -> Result<(), RecordError> {
        for (field, value) in [("size", self.size), ("price", self.price), ("abv", self.abv)] {
            if !value.is_finite() {
                return Err(RecordError::NotFinite {
                    id: self.id.clone(),
                    field,
                });
            }
        }
        if self.price <= 0.0 {
            return Err(RecordError::NonPositivePrice {
                id: self.id.clone(),
                price: self.price,
            });
        }
        for (field, value) in [("size", self.size), ("abv", self.abv)] {
            if value < 0.0 {
                return Err(RecordError::Negative {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
        }
        if self.abv > 100.0 {
            return Err(RecordError::AbvOutOfRange {
                id: self.id.clone(),
                abv: self.abv,
            });
        }
        Ok(())
    }

    pub fn source_group_or_empty(&self) -> &str {
        self.source_group.as_deref().unwrap_or("")
    }
}

/// An item annotated with its derived value score.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredItem {
    pub item: Item,
    pub value_score: f64,
}

impl ScoredItem {
    pub fn id(&self) -> &ItemId {
        &self.item.id
    }
}

/// A record that was dropped before scoring.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RecordError {
    #[error("record {id}: missing field `{field}`")]
    MissingField { id: ItemId, field: &'static str },
    #[error("record {id}: malformed row: {reason}")]
    Malformed { id: ItemId, reason: String },
    #[error("record {id}: price must be positive (got {price})")]
    NonPositivePrice { id: ItemId, price: f64 },
    #[error("record {id}: {field} must not be negative (got {value})")]
    Negative {
        id: ItemId,
        field: &'static str,
        value: f64,
    },
    #[error("record {id}: abv {abv} is outside 0-100")]
    AbvOutOfRange { id: ItemId, abv: f64 },
    #[error("record {id}: {field} is not a finite number")]
    NotFinite { id: ItemId, field: &'static str },
}

#[cfg(test)]
pub(crate) fn sample_item(id: &str, abv: f64, size: f64, price: f64) -> Item {
    Item {
        id: ItemId::new(id),
        name: format!("Beer {id}"),
        category: "Lager".to_string(),
        size,
        price,
        abv,
        source_group: None,
    }
}
