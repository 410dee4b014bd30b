use crate::{
    constants::SHEET_NAME,
    error::ReportError,
    stores::{Field, Store, Stores},
};

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet};
use serde_json::Number;

/// Output columns, in order.
pub const REPORT_COLUMNS: [&str; 8] = [
    "Input Postal Code",
    "Store Name",
    "Store ID",
    "Address",
    "Contact",
    "Map Link",
    "Distance (km)",
    "City",
];

/// Rows a single xlsx sheet can hold, header included.
const MAX_SHEET_ROWS: usize = 1_048_576;

/// Characters a single xlsx cell can hold. Longer text is cut to fit.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Largest integer an xlsx number (an f64) stores exactly.
const MAX_EXACT_INTEGER: u64 = 1 << 53;

#[derive(Clone, Debug, PartialEq)]
pub struct ReportRow {
    pub pincode: String,
    pub store: Store,
}

/// Every (pincode, store) pair of a batch, flattened.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    pub fn assemble<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (String, Stores)>,
    {
        let rows = results
            .into_iter()
            .flat_map(|(pincode, stores)| {
                stores.into_iter().map(move |store| ReportRow {
                    pincode: pincode.clone(),
                    store,
                })
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the report as an xlsx workbook with a single sheet.
    pub fn to_xlsx(&self) -> Result<Vec<u8>, ReportError> {
        if self.rows.len() >= MAX_SHEET_ROWS {
            return Err(ReportError::TooManyRows(self.rows.len()));
        }
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        let header_format = Format::new().set_bold();
        for (col, title) in REPORT_COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as ColNum, *title, &header_format)?;
        }

        for (idx, row) in self.rows.iter().enumerate() {
            let row_num = (idx + 1) as RowNum;
            worksheet.write_string(row_num, 0, fit_cell(&row.pincode))?;
            for (col, field) in row.store.fields().into_iter().enumerate() {
                write_field(worksheet, row_num, (col + 1) as ColNum, field)?;
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

fn write_field(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    field: &Field,
) -> Result<(), ReportError> {
    match field {
        Field::Empty => {}
        Field::Text(s) => {
            worksheet.write_string(row, col, fit_cell(s))?;
        }
        Field::Number(n) => match exact_f64(n) {
            Some(value) => {
                worksheet.write_number(row, col, value)?;
            }
            None => {
                worksheet.write_string(row, col, n.to_string())?;
            }
        },
        Field::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}

fn fit_cell(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// The number as an f64, or `None` when an f64 would not hold it exactly.
fn exact_f64(n: &Number) -> Option<f64> {
    if let Some(i) = n.as_i64() {
        return (i.unsigned_abs() <= MAX_EXACT_INTEGER).then_some(i as f64);
    }
    if let Some(u) = n.as_u64() {
        return (u <= MAX_EXACT_INTEGER).then_some(u as f64);
    }
    n.as_f64()
}
