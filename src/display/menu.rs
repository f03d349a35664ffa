//! Menu text for the interactive workflows

/// Entries of the authorization menu, numbered from 1
pub const AUTH_MENU: [&str; 3] = [
    "Sign in with your login and password.",
    "Register a new user.",
    "Exit the program.",
];

/// Entries of the main ledger menu, numbered from 1
pub const LEDGER_MENU: [&str; 5] = [
    "Add an expense.",
    "Add an income.",
    "Delete an expense.",
    "Delete an income.",
    "Exit the program.",
];

const WELCOME_TITLE: &str = "Expense and income tracker.";
const WELCOME_HINT: &str = "Sign in or register to continue.";

/// Boxed greeting shown before the authorization menu
pub fn welcome_banner() -> String {
    let width = WELCOME_HINT.len().max(WELCOME_TITLE.len());
    let border = "*".repeat(width + 4);
    format!(
        "{border}\n* {:^width$} *\n* {:<width$} *\n{border}",
        WELCOME_TITLE,
        WELCOME_HINT,
        border = border,
        width = width
    )
}

/// Boxed title over a numbered list
pub fn format_menu(title: &str, items: &[&str]) -> String {
    let border = "*".repeat(title.len() + 20);
    let mut output = format!(
        "{border}\n* {:^width$} *\n{border}",
        title,
        border = border,
        width = title.len() + 16
    );
    for (i, item) in items.iter().enumerate() {
        output.push_str(&format!("\n{} - {}", i + 1, item));
    }
    output
}
