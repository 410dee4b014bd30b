use std::time::Duration;

/// The default endpoint for the store locator service
pub const DEFAULT_STORE_SERVICE_URL: &str = "https://api.thesleepcompany.in/stores";

/// The header to use to send API keys in requests
pub const API_KEY_HEADER: &str = "x-api-key";

/// The query parameter carrying the pincode being looked up
pub const PINCODE_QUERY_PARAM: &str = "pincode";

/// Headers the store locator expects from its own web frontend.
pub const BROWSER_HEADERS: [(&str, &str); 6] = [
    ("accept", "*/*"),
    ("accept-language", "en-US,en;q=0.9"),
    ("content-type", "application/json"),
    ("origin", "https://thesleepcompany.in"),
    ("referer", "https://thesleepcompany.in/"),
    ("user-agent", "Mozilla/5.0 (Linux; Android 6.0; Nexus 5 Build/MRA58N) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Mobile Safari/537.36"),
];

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_STORES: usize = 10;

/// Pause between consecutive lookups in a batch.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(500);

/// Substrings that mark a header as the pincode column, checked case-insensitively.
pub const PINCODE_COLUMN_HINTS: [&str; 4] = ["pin", "zip", "postal", "code"];

pub const SHEET_NAME: &str = "Nearest Stores";
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "Nearest_Stores.xlsx";
