//! Status banners and diagnostic text, styled the same way everywhere.

use console::style;

#[inline]
pub fn info(message: &str) {
    eprintln!("{}", style(message).cyan());
}

#[inline]
pub fn success(message: &str) {
    eprintln!("{}", style(format!("✓ {}", message)).green());
}

#[inline]
pub fn warning(message: &str) {
    eprintln!("{}", style(format!("⚠ {}", message)).yellow());
}

#[inline]
pub fn error(message: &str) {
    eprintln!("{}", style(format!("✗ {}", message)).red().bold());
}

#[inline]
pub fn diagnostic(message: &str) {
    eprintln!("{}", style(message).dim());
}

/// First `max_chars` characters of a text, with an ellipsis when truncated.
#[inline]
pub fn preview(text: &str, max_chars: usize) -> String {
    let chars = text.chars().count();
    if chars <= max_chars {
        return text.to_string();
    }

    let head: String = text.chars().take(max_chars).collect();
    format!("{}…", head)
}
