//! Budget spreadsheet writer using `rust_xlsxwriter`.

use async_trait::async_trait;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::domain::budget::{BudgetSheet, SheetCell};
use crate::ports::{BudgetSpreadsheetExporter, ExportError};

/// Rows of the letterhead block rendered in bold.
const LETTERHEAD_ROWS: usize = 4;

const FOOTER_LABELS: [&str; 2] = ["SUB TOTAL", "TOTAL GERAL"];

const MONEY_FORMAT: &str = "#,##0.00";

/// Writes a [`BudgetSheet`] as a single-sheet `.xlsx` workbook.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxBudgetExporter;

impl XlsxBudgetExporter {
    pub fn new() -> Self {
        Self
    }

    fn build(sheet: &BudgetSheet) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let number = Format::new().set_num_format(MONEY_FORMAT);
        let bold_number = Format::new().set_bold().set_num_format(MONEY_FORMAT);

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (col, width) in sheet.column_widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        for (row_index, row) in sheet.rows.iter().enumerate() {
            let emphasized = is_emphasized(row_index, row);
            let row_number = row_index as u32;

            for (col_index, cell) in row.iter().enumerate() {
                let col = col_index as u16;
                match cell {
                    SheetCell::Empty => {}
                    SheetCell::Text(text) if emphasized => {
                        worksheet.write_string_with_format(row_number, col, text, &bold)?;
                    }
                    SheetCell::Text(text) => {
                        worksheet.write_string(row_number, col, text)?;
                    }
                    SheetCell::Number(value) => {
                        let format = if emphasized { &bold_number } else { &number };
                        worksheet.write_number_with_format(row_number, col, *value, format)?;
                    }
                }
            }
        }

        workbook.save_to_buffer()
    }
}

fn is_emphasized(row_index: usize, row: &[SheetCell]) -> bool {
    if row_index < LETTERHEAD_ROWS || row_index == BudgetSheet::table_header_row() {
        return true;
    }
    matches!(row.first(), Some(SheetCell::Text(label)) if FOOTER_LABELS.contains(&label.as_str()))
}

#[async_trait]
impl BudgetSpreadsheetExporter for XlsxBudgetExporter {
    async fn export(&self, sheet: &BudgetSheet) -> Result<Vec<u8>, ExportError> {
        Self::build(sheet).map_err(|e| ExportError::spreadsheet_failed(e.to_string()))
    }
}
