//! Tabular layout of the exported budget spreadsheet.

use super::{BudgetAggregate, BudgetCalculator};
use crate::domain::organization::OrganizationHeader;
use crate::domain::project::ProjectSnapshot;

/// Worksheet name.
pub const SHEET_NAME: &str = "Orçamento";

/// Title row below the letterhead.
pub const SHEET_TITLE: &str = "ORÇAMENTO ESTIMATIVO";

/// Data table column labels.
pub const COLUMN_HEADERS: [&str; 10] = [
    "ITEM",
    "FONTE",
    "DESCRIÇÃO",
    "UNID",
    "QTD",
    "UNIT MAT",
    "TOTAL MAT",
    "UNIT MDO",
    "TOTAL MDO",
    "TOTAL",
];

/// Column widths in characters.
pub const COLUMN_WIDTHS: [f64; 10] = [8.0, 15.0, 50.0, 8.0, 10.0, 12.0, 12.0, 12.0, 12.0, 15.0];

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetCell {
    Empty,
    Text(String),
    Number(f64),
}

impl SheetCell {
    fn text(value: impl Into<String>) -> Self {
        SheetCell::Text(value.into())
    }
}

/// Rows and column widths of the budget worksheet, independent of file format.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSheet {
    pub name: String,
    pub rows: Vec<Vec<SheetCell>>,
    pub column_widths: Vec<f64>,
    pub aggregate: BudgetAggregate,
}

impl BudgetSheet {
    /// Lays out letterhead, project block, one row per item and the footer.
    ///
    /// Rows are numbered `1.{n}` in list order. A blank row separates the
    /// items from `SUB TOTAL` and `TOTAL GERAL`.
    pub fn build(header: &OrganizationHeader, snapshot: &ProjectSnapshot) -> Self {
        let details = &snapshot.details;
        let mut rows = vec![
            vec![SheetCell::text(&header.secretariat)],
            vec![SheetCell::text(&header.agency)],
            vec![SheetCell::text(&header.finance_division)],
            vec![SheetCell::text(SHEET_TITLE)],
            vec![],
            vec![SheetCell::text("ASSUNTO:"), SheetCell::text(details.object())],
            vec![SheetCell::text("UNIDADE:"), SheetCell::text(details.unit())],
            vec![SheetCell::text("LOCAL:"), SheetCell::text(details.location())],
            vec![],
            COLUMN_HEADERS.iter().map(|h| SheetCell::text(*h)).collect(),
        ];

        for (index, item) in snapshot.services.iter().enumerate() {
            let line = BudgetCalculator::line_totals(item);
            rows.push(vec![
                SheetCell::Text(format!("1.{}", index + 1)),
                SheetCell::Text(format!("{} {}", item.source, item.code)),
                SheetCell::text(&item.name),
                SheetCell::text(&item.unit),
                SheetCell::Number(item.quantity),
                SheetCell::Number(item.material_unit_price.value()),
                SheetCell::Number(line.material_total.value()),
                SheetCell::Number(item.labor_unit_price.value()),
                SheetCell::Number(line.labor_total.value()),
                SheetCell::Number(line.line_total.value()),
            ]);
        }

        let aggregate = BudgetCalculator::aggregate(&snapshot.services);
        rows.push(vec![]);
        rows.push(footer_row(
            "SUB TOTAL",
            &[
                (6, aggregate.total_material.value()),
                (8, aggregate.total_labor.value()),
                (9, aggregate.total_general.value()),
            ],
        ));
        rows.push(footer_row("TOTAL GERAL", &[(9, aggregate.total_general.value())]));

        Self {
            name: SHEET_NAME.to_string(),
            rows,
            column_widths: COLUMN_WIDTHS.to_vec(),
            aggregate,
        }
    }

    /// Index of the column header row.
    pub fn table_header_row() -> usize {
        9
    }
}

fn footer_row(label: &str, values: &[(usize, f64)]) -> Vec<SheetCell> {
    let mut row = vec![SheetCell::Empty; COLUMN_HEADERS.len()];
    row[0] = SheetCell::text(label);
    for (col, value) in values {
        row[*col] = SheetCell::Number(*value);
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::{ProjectDetails, ServiceItem};
    use chrono::NaiveDate;

    fn snapshot(items: Vec<ServiceItem>) -> ProjectSnapshot {
        let details = ProjectDetails::new(
            "Reforma Escola X",
            "Rua A, 1",
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            "6ª Cia",
        )
        .unwrap();
        ProjectSnapshot::new(details, items)
    }

    #[test]
    fn layout_has_header_items_and_footer() {
        let item = ServiceItem::new("18.06.142", "Piso", "m²", 10.0).with_prices(51.0, 34.0);
        let sheet = BudgetSheet::build(&OrganizationHeader::default(), &snapshot(vec![item]));

        assert_eq!(sheet.name, "Orçamento");
        assert_eq!(sheet.rows[5][1], SheetCell::Text("Reforma Escola X".to_string()));
        assert_eq!(sheet.rows[BudgetSheet::table_header_row()][0], SheetCell::Text("ITEM".to_string()));

        let data = &sheet.rows[10];
        assert_eq!(data[0], SheetCell::Text("1.1".to_string()));
        assert_eq!(data[1], SheetCell::Text("CDHU 18.06.142".to_string()));
        assert_eq!(data[9], SheetCell::Number(850.0));

        assert!(sheet.rows[11].is_empty());
        let subtotal = &sheet.rows[12];
        assert_eq!(subtotal[0], SheetCell::Text("SUB TOTAL".to_string()));
        assert_eq!(subtotal[6], SheetCell::Number(510.0));
        assert_eq!(subtotal[8], SheetCell::Number(340.0));
        assert_eq!(subtotal[7], SheetCell::Empty);

        let total = &sheet.rows[13];
        assert_eq!(total[0], SheetCell::Text("TOTAL GERAL".to_string()));
        assert_eq!(total[9], SheetCell::Number(850.0));
    }

    #[test]
    fn empty_project_still_has_footer() {
        let sheet = BudgetSheet::build(&OrganizationHeader::default(), &snapshot(vec![]));
        assert_eq!(sheet.rows.len(), 13);
        assert_eq!(sheet.rows[12][9], SheetCell::Number(0.0));
        assert_eq!(sheet.column_widths.len(), 10);
    }
}
