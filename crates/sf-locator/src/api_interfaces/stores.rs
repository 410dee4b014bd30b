use serde::Deserialize;
use serde_json::Value;

// Request structure is omitted since the only input is the `pincode` query parameter.

/// Raw response from the store locator.
///
/// `success` must be a JSON boolean; truthy values such as `1` or `"true"` fail to parse.
/// Entries of `stores` stay untyped until the caller has capped the list, so a bad
/// entry further down cannot discard the ones in front of it.
#[derive(Deserialize)]
pub struct Response {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub stores: Vec<Value>,
}

/// Raw store entry. Values are kept as-is; the service is not consistent about
/// sending ids and distances as strings or numbers.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(default)]
    pub store_name: Value,
    #[serde(default)]
    pub store_id: Value,
    #[serde(default)]
    pub address: Value,
    #[serde(default)]
    pub contact: Value,
    #[serde(default)]
    pub map_link: Value,
    #[serde(default)]
    pub distance: Value,
    #[serde(default)]
    pub city: Value,
}
