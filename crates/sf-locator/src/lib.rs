mod api_interfaces {
    pub mod stores;
}
mod api_key;
pub mod batch;
pub mod constants;
pub mod error;
pub mod pincodes;
pub mod report;
pub mod stores;
mod util;

pub use api_key::ApiKey;
pub use batch::{Batch, BatchOutcome, Progress, Summary};
pub use pincodes::Pincodes;
pub use report::Report;
pub use stores::{Lookup, StoreLocator, StoreLocatorConfig, StoreLocatorConfigBuilder, Stores};
pub use util::default_http_client;
