use std::{fmt, time::Duration};

use crate::{api_interfaces::stores, constants::*, error::GetError, ApiKey};

use derive_builder::Builder;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Number, Value};
use tracing::debug;

/// A single value copied from a store entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Field {
    #[default]
    Empty,
    Text(String),
    /// Kept as sent so large integer ids survive.
    Number(Number),
    Bool(bool),
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Field::Empty,
            Value::String(s) if s.is_empty() => Field::Empty,
            Value::String(s) => Field::Text(s),
            Value::Number(n) => Field::Number(n),
            Value::Bool(b) => Field::Bool(b),
            other => Field::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Empty => Ok(()),
            Field::Text(s) => f.write_str(s),
            Field::Number(n) => write!(f, "{}", n),
            Field::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// One store returned by the locator, restricted to the fields we report.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(rename = "storeName")]
    pub name: Field,
    #[serde(rename = "storeId")]
    pub id: Field,
    pub address: Field,
    pub contact: Field,
    pub map_link: Field,
    pub distance: Field,
    pub city: Field,
}

impl Store {
    /// Fields in report column order.
    pub fn fields(&self) -> [&Field; 7] {
        [
            &self.name,
            &self.id,
            &self.address,
            &self.contact,
            &self.map_link,
            &self.distance,
            &self.city,
        ]
    }
}

impl From<stores::Store> for Store {
    fn from(raw: stores::Store) -> Self {
        Self {
            name: raw.store_name.into(),
            id: raw.store_id.into(),
            address: raw.address.into(),
            contact: raw.contact.into(),
            map_link: raw.map_link.into(),
            distance: raw.distance.into(),
            city: raw.city.into(),
        }
    }
}

/// Stores nearest to a pincode, closest first, capped at the locator's `max_stores`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Stores(pub(crate) Vec<Store>);

impl Stores {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Store> {
        self.0.iter()
    }
}

impl IntoIterator for Stores {
    type Item = Store;
    type IntoIter = std::vec::IntoIter<Store>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Result of a lookup that is not allowed to fail.
#[derive(Debug)]
pub enum Lookup {
    Found(Stores),
    NoResult(GetError),
}

impl Lookup {
    /// The stores found, or an empty list when the lookup failed.
    pub fn into_stores(self) -> Stores {
        match self {
            Lookup::Found(stores) => stores,
            Lookup::NoResult(_) => Stores::default(),
        }
    }
}

#[derive(Builder, Clone, Debug)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct StoreLocatorConfig {
    pub api_key: ApiKey,
    #[builder(setter(into), default = "DEFAULT_STORE_SERVICE_URL.to_string()")]
    pub endpoint: String,
    #[builder(default = "DEFAULT_TIMEOUT")]
    pub timeout: Duration,
    #[builder(default = "DEFAULT_MAX_STORES")]
    pub max_stores: usize,
}

impl StoreLocatorConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.api_key.as_ref().is_some_and(ApiKey::is_empty) {
            return Err("the API key must not be empty".to_string());
        }
        if self.endpoint.as_ref().is_some_and(|url| url.trim().is_empty()) {
            return Err("the endpoint must not be empty".to_string());
        }
        if self.timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err("the timeout must be greater than zero".to_string());
        }
        if self.max_stores == Some(0) {
            return Err("max_stores must be at least 1".to_string());
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct StoreLocator {
    http_client: Client,
    config: StoreLocatorConfig,
}

impl StoreLocator {
    pub fn new(http_client: Client, config: StoreLocatorConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Ask the locator for the stores nearest to `pincode`.
    pub async fn find_nearest(&self, pincode: &str) -> Result<Stores, GetError> {
        let request = BROWSER_HEADERS.iter().fold(
            self.http_client
                .get(&self.config.endpoint)
                .query(&[(PINCODE_QUERY_PARAM, pincode.trim())])
                .timeout(self.config.timeout),
            |request, (name, value)| request.header(*name, *value),
        );
        let response = request
            .header(API_KEY_HEADER, self.config.api_key.get())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(GetError::ResponseError(response.status()));
        }
        let body = response.text().await.map_err(GetError::ResponseBodyError)?;
        let parsed: stores::Response = serde_json::from_str(&body)?;
        if !parsed.success {
            return Err(GetError::Unsuccessful);
        }
        Ok(Stores(
            parsed
                .stores
                .into_iter()
                .take(self.config.max_stores)
                .filter_map(|entry| match serde_json::from_value::<stores::Store>(entry) {
                    Ok(raw) => Some(Store::from(raw)),
                    Err(e) => {
                        debug!(pincode, error = %e, "skipping malformed store entry");
                        None
                    }
                })
                .collect(),
        ))
    }

    /// Like [`StoreLocator::find_nearest`], but failures become [`Lookup::NoResult`].
    /// Nothing is retried.
    pub async fn lookup(&self, pincode: &str) -> Lookup {
        match self.find_nearest(pincode).await {
            Ok(stores) => Lookup::Found(stores),
            Err(e) => {
                debug!(pincode, error = %e, "lookup returned no result");
                Lookup::NoResult(e)
            }
        }
    }
}
