use std::{collections::HashSet, io::Read, path::Path};

use crate::{constants::PINCODE_COLUMN_HINTS, error::LoadError};

use tracing::{debug, info};

/// Distinct pincodes read from an uploaded file, in first-occurrence order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pincodes {
    column: String,
    codes: Vec<String>,
}

impl Pincodes {
    /// Read pincodes from a CSV file on disk.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path).await?;
        let pincodes = Self::from_csv_reader(contents.as_slice())?;
        info!(
            path = %path.display(),
            column = %pincodes.column,
            count = pincodes.len(),
            "loaded pincodes"
        );
        Ok(pincodes)
    }

    /// Read pincodes from delimited text with a header row.
    ///
    /// The first header mentioning a pin/zip/postal code is used, otherwise the
    /// first column. Values that are not made up entirely of digits are dropped.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if headers.is_empty() {
            return Err(LoadError::NoColumns);
        }
        let column_idx = pincode_column(headers.iter());
        let column = headers.get(column_idx).unwrap_or_default().to_string();
        debug!(column = %column, "selected pincode column");

        let mut seen = HashSet::new();
        let mut codes = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let Some(value) = record.get(column_idx) else {
                continue;
            };
            if is_pincode(value) && seen.insert(value.to_string()) {
                codes.push(value.to_string());
            }
        }
        Ok(Self { column, codes })
    }

    /// Header of the column the pincodes were read from.
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.codes.iter()
    }
}

fn pincode_column<'a>(headers: impl Iterator<Item = &'a str>) -> usize {
    headers
        .map(str::to_lowercase)
        .position(|header| PINCODE_COLUMN_HINTS.iter().any(|hint| header.contains(hint)))
        .unwrap_or(0)
}

fn is_pincode(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn codes(pincodes: &Pincodes) -> Vec<&str> {
        pincodes.iter().map(String::as_str).collect()
    }

    #[test]
    fn pincode_column_dedupes_and_filters() {
        // Arrange
        let csv = "Name,Pincode\nA,110001\nB,110001\nC,abc\nD,560001\n";

        // Act
        let pincodes = Pincodes::from_csv_reader(csv.as_bytes()).unwrap();

        // Assert
        assert_eq!(pincodes.column(), "Pincode");
        assert_eq!(codes(&pincodes), vec!["110001", "560001"]);
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let csv = "city,ZIP CODE\nDelhi,110001\n";

        let pincodes = Pincodes::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(pincodes.column(), "ZIP CODE");
        assert_eq!(codes(&pincodes), vec!["110001"]);
    }

    #[test]
    fn first_matching_column_wins() {
        let csv = "store,postal_code,pin\nx,400001,500001\n";

        let pincodes = Pincodes::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(pincodes.column(), "postal_code");
        assert_eq!(codes(&pincodes), vec!["400001"]);
    }

    #[test]
    fn falls_back_to_first_column() {
        let csv = "area,city\n600001,Chennai\n700001,Kolkata\n";

        let pincodes = Pincodes::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(pincodes.column(), "area");
        assert_eq!(codes(&pincodes), vec!["600001", "700001"]);
    }

    #[test]
    fn drops_empty_and_non_digit_values() {
        let csv = "pincode\n\n 110001 \n11000.1\n-110001\n\"\"\n560 001\n";

        let pincodes = Pincodes::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(codes(&pincodes), vec!["110001"]);
    }

    #[test]
    fn keeps_first_occurrence_order() {
        let csv = "pincode\n3\n1\n3\n2\n1\n";

        let pincodes = Pincodes::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(codes(&pincodes), vec!["3", "1", "2"]);
    }

    #[test]
    fn short_rows_are_skipped() {
        let csv = "name,pincode\nA,110001\nB\nC,560001\n";

        let pincodes = Pincodes::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(codes(&pincodes), vec!["110001", "560001"]);
    }

    #[test]
    fn no_matches_is_empty_not_error() {
        let csv = "pincode\nabc\ndef\n";

        let pincodes = Pincodes::from_csv_reader(csv.as_bytes()).unwrap();

        assert!(pincodes.is_empty());
    }

    #[test]
    fn empty_file_has_no_columns() {
        let pincodes = Pincodes::from_csv_reader("".as_bytes());

        assert!(matches!(pincodes.unwrap_err(), LoadError::NoColumns));
    }

    #[tokio::test]
    async fn load_success() {
        // Arrange
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "Pincodes\n110001\n560001\n").unwrap();

        // Act
        let pincodes = Pincodes::load(temp_file.path()).await;

        // Assert
        assert!(
            pincodes.is_ok(),
            "Failed to load pincodes: {:?}",
            pincodes.unwrap_err()
        );
        assert_eq!(pincodes.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn load_invalid_file() {
        let pincodes = Pincodes::load("totally_nonexistent.csv").await;

        assert!(matches!(pincodes.unwrap_err(), LoadError::ReadError(_)));
    }
}
