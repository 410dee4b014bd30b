use thiserror::Error;

#[derive(Debug, Error)]
pub enum GetError {
    #[error("the request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("the request failed with status code: {0}")]
    ResponseError(reqwest::StatusCode),
    #[error("the response body could not be read: {0}")]
    ResponseBodyError(#[source] reqwest::Error),
    #[error("unable to parse the response body: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("the service reported an unsuccessful lookup")]
    Unsuccessful,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read the file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("unable to parse the file: {0}")]
    CsvError(#[from] csv::Error),
    #[error("the file has no header row")]
    NoColumns,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unable to write the spreadsheet: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),
    #[error("too many rows for a single sheet: {0}")]
    TooManyRows(usize),
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("no valid pincodes found")]
    NoPincodes,
    #[error("unable to build the report: {0}")]
    ReportError(#[from] ReportError),
}
