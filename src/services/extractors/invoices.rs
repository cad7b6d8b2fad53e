// src/services/extractors/invoices.rs

//! Invoices extractor: aggregate remaining balance.
//!
//! Only the sum survives; no per-invoice rows are retained. A cell that
//! fails numeric parsing is excluded from the sum, never treated as zero.

use crate::error::Result;
use crate::models::{Financials, PortalPage};
use crate::services::Session;

pub(crate) const REQUIRED_LOCATORS: &[&str] = &[
    "invoices.page_header",
    "invoices.table_rows",
    "invoices.row_cells",
];

/// Zero-based index of the balance column.
const BALANCE_COLUMN: usize = 8;
/// Rows with fewer cells are spacers or headers, not invoices.
const MIN_COLUMNS: usize = 9;

pub async fn extract(session: &Session) -> Result<Financials> {
    let browser = session.browser()?;
    let timeout = session.page_timeout();

    browser
        .goto(&session.page_url(PortalPage::Invoices)?)
        .await?;
    browser
        .wait_present(session.locator("invoices.page_header")?, timeout)
        .await?;

    let rows = browser
        .find_all(session.locator("invoices.table_rows")?)
        .await?;
    let cell_locator = session.locator("invoices.row_cells")?;

    let mut balance_cells = Vec::new();
    for row in &rows {
        let cells = browser.find_all_in(row, cell_locator).await?;
        if cells.len() >= MIN_COLUMNS {
            balance_cells.push(browser.read_text(&cells[BALANCE_COLUMN]).await?);
        }
    }

    let total = sum_balances(&balance_cells);
    log::info!("calculated total remaining balance: {total}");
    Ok(Financials {
        total_remaining_balance: total,
    })
}

/// Sum the parseable balance cells, silently skipping the rest.
fn sum_balances(cells: &[String]) -> f64 {
    cells
        .iter()
        .filter_map(|cell| cell.trim().parse::<f64>().ok())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn non_numeric_cells_are_excluded_without_error() {
        let total = sum_balances(&cells(&["100.50", "abc", "49.50"]));
        assert_eq!(total, 150.00);
    }

    #[test]
    fn empty_table_sums_to_zero() {
        assert_eq!(sum_balances(&[]), 0.0);
    }

    #[test]
    fn whitespace_around_numbers_is_tolerated() {
        assert_eq!(sum_balances(&cells(&[" 10.5 ", "\t4.5\n"])), 15.0);
    }
}
