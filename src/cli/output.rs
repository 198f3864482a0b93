//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::arena::TreeSnapshot;
use crate::ledger::Ledger;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data/JSON)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print every step of a ledger: dimmed sequence number, description,
/// dimmed subject reference.
pub fn ledger(ledger: &Ledger) {
    for step in ledger.steps() {
        let subject = step
            .subject
            .as_deref()
            .map(|s| format!("  [{s}]"))
            .unwrap_or_default();
        println!(
            "{} {}{}",
            format!("{:>4}.", step.step).dimmed(),
            step.description,
            subject.dimmed()
        );
    }
    println!("{}", format!("({} operations)", ledger.op_count()).dimmed());
}

/// Render a serialized tree with termtree, left child first.
pub fn render_tree(root: &TreeSnapshot) -> termtree::Tree<String> {
    let mut tree = termtree::Tree::new(root.value.to_string());
    if let Some(left) = &root.left {
        tree.push(render_tree(left));
    }
    if let Some(right) = &root.right {
        tree.push(render_tree(right));
    }
    tree
}
