//! Budget module - cost derivation and the spreadsheet layout.

mod calculator;
mod sheet;

pub use calculator::{BudgetAggregate, BudgetCalculator, LineTotals};
pub use sheet::{BudgetSheet, SheetCell, COLUMN_HEADERS, COLUMN_WIDTHS, SHEET_NAME, SHEET_TITLE};
