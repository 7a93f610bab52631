use prettytable::format;
use prettytable::Cell;
use prettytable::Row;
use prettytable::Table;

use crate::models::Transaction;

/// Column-aligned table of a set of transactions
pub fn render(transactions: &[Transaction]) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(
        ["Date", "Amount", "Location", "Category", "Description"]
            .iter()
            .map(|title| Cell::new(title))
            .collect(),
    ));
    for t in transactions.iter() {
        table.add_row(Row::new(vec![
            Cell::new(t.date().unwrap_or("")),
            Cell::new(t.amount()).style_spec("r"),
            Cell::new(t.location()),
            Cell::new(t.category().unwrap_or("")),
            Cell::new(t.description().unwrap_or("")),
        ]));
    }
    table.to_string()
}
