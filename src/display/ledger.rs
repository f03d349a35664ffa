//! Ledger display formatting
//!
//! Renders a ledger as a side-by-side expenses/incomes table with totals and
//! the derived balance.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::error::TallyResult;
use crate::models::{EntryKind, Ledger, LedgerEntry, Money};

const OUT_OF_RANGE: &str = "out of range";

/// Format `login`'s ledger as a table followed by the balance line
pub fn format_ledger(login: &str, ledger: &Ledger, currency_symbol: &str) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "Expenses".to_string(),
        "Amount".to_string(),
        "Incomes".to_string(),
        "Amount".to_string(),
    ]);

    let expenses = ledger.expenses();
    let incomes = ledger.incomes();
    for row in 0..expenses.len().max(incomes.len()) {
        let (expense, expense_amount) = cells(expenses.get(row));
        let (income, income_amount) = cells(incomes.get(row));
        builder.push_record([expense, expense_amount, income, income_amount]);
    }

    builder.push_record([String::new(), String::new(), String::new(), String::new()]);
    builder.push_record([
        "Expenses total:".to_string(),
        amount_cell(ledger.total(EntryKind::Expense)),
        "Incomes total:".to_string(),
        amount_cell(ledger.total(EntryKind::Income)),
    ]);

    let mut table = builder.build();
    table.with(Style::modern());

    let balance = match ledger.balance() {
        Ok(balance) => format_balance(login, balance, currency_symbol),
        Err(_) => format!("{}, your current balance is {}", login, OUT_OF_RANGE),
    };

    format!("Expenses and incomes of '{}':\n{}\n{}", login, table, balance)
}

/// One-line balance summary
pub fn format_balance(login: &str, balance: Money, currency_symbol: &str) -> String {
    format!(
        "{}, your current balance: {}",
        login,
        balance.format_with_symbol(currency_symbol)
    )
}

fn amount_cell(amount: TallyResult<Money>) -> String {
    amount.map_or_else(|_| OUT_OF_RANGE.to_string(), |m| m.to_string())
}

fn cells(entry: Option<&LedgerEntry>) -> (String, String) {
    match entry {
        Some(e) => (e.description.clone(), e.amount.to_string()),
        None => (String::new(), String::new()),
    }
}
