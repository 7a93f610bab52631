//! Ledger entries
//!
//! Every transaction becomes a two-posting entry, moving its amount between the account the
//! set was read from and its category:
//!
//! ```text
//! 2012/01/01 SAFEWAY
//!     Food                                                 10.00
//!     Assets:Checking                                     -10.00
//! ```
use crate::models::{invert_sign, Transaction};

/// The narrowest the name column is ever printed
pub const MIN_WIDTH: usize = 50;

const UNCATEGORIZED: &str = "Uncategorized";

pub fn render(transactions: &[Transaction], account: &str, width: usize) -> String {
    let name_width = transactions
        .iter()
        .map(|t| t.category().unwrap_or(UNCATEGORIZED).chars().count())
        .chain(std::iter::once(account.chars().count()))
        .chain(std::iter::once(width.max(MIN_WIDTH)))
        .max()
        .unwrap_or(MIN_WIDTH);
    let amount_width = transactions
        .iter()
        .map(|t| unsigned(t.amount()).1.chars().count())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for t in transactions.iter() {
        match t.date() {
            Some(date) => output.push_str(&format!("{} {}\n", date, t.location())),
            None => output.push_str(&format!("{}\n", t.location())),
        }
        if let Some(description) = t.description() {
            output.push_str(&format!("    ; {}\n", description));
        }
        let category = t.category().unwrap_or(UNCATEGORIZED);
        for (name, amount) in [
            (category, invert_sign(t.amount())),
            (account, t.amount().to_string()),
        ]
        .iter()
        {
            let (negative, digits) = unsigned(amount);
            let signed = format!("{}{}", if negative { "-" } else { "" }, digits);
            output.push_str(&format!(
                "    {:<name_width$} {:>amount_width$}\n",
                name,
                signed,
                name_width = name_width,
                amount_width = amount_width + 1,
            ));
        }
        output.push('\n');
    }
    output
}

/// Splits the sign from the digits
fn unsigned(amount: &str) -> (bool, &str) {
    match amount.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, amount.strip_prefix('+').unwrap_or(amount)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_layout() {
        let transactions = vec![
            Transaction::new(Some("2012/01/01"), "-10.00", "SAFEWAY", Some("Food"), None)
                .unwrap(),
            Transaction::new(Some("2012/01/02"), "1500.00", "PAYROLL", None, Some("January"))
                .unwrap(),
        ];
        let output = render(&transactions, "Assets:Checking", 0);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "2012/01/01 SAFEWAY");
        assert_eq!(lines[1], format!("    {:<50}    10.00", "Food"));
        assert_eq!(lines[2], format!("    {:<50}   -10.00", "Assets:Checking"));
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "2012/01/02 PAYROLL");
        assert_eq!(lines[5], "    ; January");
        assert_eq!(lines[6], format!("    {:<50} -1500.00", "Uncategorized"));
        assert_eq!(lines[7], format!("    {:<50}  1500.00", "Assets:Checking"));
    }

    #[test]
    fn long_names_widen_the_column() {
        let category = "Expenses:Food:Groceries:Organic:Very:Long:Category:Name";
        let transactions =
            vec![Transaction::new(Some("2012/01/01"), "-1.00", "X", Some(category), None).unwrap()];
        let output = render(&transactions, "Assets:Cash", 10);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[1], format!("    {}  1.00", category));
        assert_eq!(lines[2], format!("    {:<width$} -1.00", "Assets:Cash", width = category.len()));
    }

    #[test]
    fn dateless_header_has_no_leading_space() {
        let transactions =
            vec![Transaction::new(None, "-2.00", "KIOSK", Some("Snacks"), None).unwrap()];
        let output = render(&transactions, "Assets:Cash", MIN_WIDTH);
        assert_eq!(output.lines().next(), Some("KIOSK"));
        assert_eq!(output.lines().count(), 4);
    }
}
