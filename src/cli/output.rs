//! Output formatting for CLI

use crate::{engine::Position, types::ValuePair};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Statistics view of a position: one row per legal move with its policy
/// weight and the successor's value.
pub fn render_position(position: &Position, next_values: &[ValuePair]) -> String {
    let mut out = format!("{position}\n");
    if position.legal_moves().is_empty() {
        return out;
    }
    out.push_str("  move  policy   next value\n");
    for ((mv, p), v) in position
        .legal_moves()
        .iter()
        .zip(position.policy())
        .zip(next_values)
    {
        out.push_str(&format!("  {mv:>4}  {p:>6.4}   {v}\n"));
    }
    out
}
