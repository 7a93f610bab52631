use crate::models::Transaction;

/// One structural representation per line
pub fn render(transactions: &[Transaction]) -> String {
    let mut output = String::new();
    for transaction in transactions.iter() {
        output.push_str(&transaction.repr());
        output.push('\n');
    }
    output
}
