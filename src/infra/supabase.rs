//! Thin asynchronous client for the Supabase REST endpoint holding the beers.
//!
//! - Fetches the beer table joined with the bar serving each beer.
//! - Validates every row into an [`Item`] before it reaches the table.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::{Item, ItemId, RecordError};
use crate::infra::provider::{FetchedItems, ItemProvider, ProviderError};
use crate::util::config::ProviderConfig;

const REST_PATH: &str = "rest/v1/";
const SELECT: &str = "*,bars!inner(name)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const USER_AGENT: &str = concat!("beer-value-table/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: Url,
    anon_key: String,
    table: String,
}

impl SupabaseClient {
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::with_config(&ProviderConfig::from_env()?)
    }

    pub fn with_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let mut base = config.url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url,
            anon_key: config.anon_key.clone(),
            table: config.table.clone(),
        })
    }

    fn table_url(&self) -> Result<Url, url::ParseError> {
        let mut url = self.base_url.join(REST_PATH)?.join(&self.table)?;
        url.query_pairs_mut().append_pair("select", SELECT);
        Ok(url)
    }

    async fn fetch_rows(&self) -> Result<serde_json::Value, ProviderError> {
        let url = self.table_url()?;
        debug!("requesting beers from {url}");

        let response = self
            .http
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorDto>(&body)
                .ok()
                .and_then(|dto| dto.message)
                .unwrap_or_else(|| status.to_string());
            return Err(ProviderError::Api(message));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ItemProvider for SupabaseClient {
    async fn fetch_items(&self) -> Result<FetchedItems, ProviderError> {
        let raw = self.fetch_rows().await?;
        let fetched = parse_rows(raw)?;
        info!(
            "fetched {} beers ({} rejected) from {}",
            fetched.items.len(),
            fetched.rejected.len(),
            self.table
        );
        Ok(fetched)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorDto {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BeerDto {
    #[serde(default, deserialize_with = "string_from_json")]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default, alias = "size", deserialize_with = "number_from_json")]
    size_oz: Option<f64>,
    #[serde(default, deserialize_with = "number_from_json")]
    price: Option<f64>,
    #[serde(default, deserialize_with = "number_from_json")]
    abv: Option<f64>,
    #[serde(default)]
    bars: Option<BarDto>,
}

#[derive(Debug, Deserialize)]
struct BarDto {
    #[serde(default)]
    name: Option<String>,
}

impl BeerDto {
    fn into_item(self, row: usize) -> Result<Item, RecordError> {
        let Some(id) = self.id else {
            return Err(RecordError::MissingField {
                id: placeholder_id(row),
                field: "id",
            });
        };
        let id = ItemId::new(id);
        let missing = |field| RecordError::MissingField {
            id: id.clone(),
            field,
        };

        let size = self.size_oz.ok_or_else(|| missing("size_oz"))?;
        let price = self.price.ok_or_else(|| missing("price"))?;
        let abv = self.abv.ok_or_else(|| missing("abv"))?;

        let item = Item {
            id,
            name: self.name.unwrap_or_default(),
            category: self.kind.unwrap_or_default(),
            size,
            price,
            abv,
            source_group: self.bars.and_then(|bar| bar.name),
        }
        .normalized();
        item.validate()?;
        Ok(item)
    }
}

fn parse_rows(value: serde_json::Value) -> Result<FetchedItems, ProviderError> {
    let serde_json::Value::Array(rows) = value else {
        return Err(ProviderError::Api("expected a list of beers".to_string()));
    };

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(row, raw)| {
            let id = raw_id(&raw).unwrap_or_else(|| placeholder_id(row));
            match serde_json::from_value::<BeerDto>(raw) {
                Ok(dto) => dto.into_item(row),
                Err(err) => {
                    debug!("row {row} is not a beer: {err}");
                    Err(RecordError::Malformed {
                        id,
                        reason: err.to_string(),
                    })
                }
            }
        })
        .collect())
}

/// Stands in for a row without a usable id, e.g. `#3` for the fourth row.
fn placeholder_id(row: usize) -> ItemId {
    ItemId::new(format!("#{row}"))
}

fn raw_id(raw: &serde_json::Value) -> Option<ItemId> {
    match raw.get("id")? {
        serde_json::Value::String(id) => Some(ItemId::new(id.as_str())),
        serde_json::Value::Number(id) => Some(ItemId::new(id.to_string())),
        _ => None,
    }
}

fn string_from_json<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct StringOrNumber;

    impl<'de> serde::de::Visitor<'de> for StringOrNumber {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

/// Postgres `numeric` columns may come back as strings.
fn number_from_json<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct NumberOrString;

    impl<'de> serde::de::Visitor<'de> for NumberOrString {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number or numeric string")
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(value), &self))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(NumberOrString)
}
