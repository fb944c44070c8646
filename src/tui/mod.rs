//! TUI module for goalplan
//!
//! Provides a terminal user interface for:
//! - Submitting a goal to the plan service
//! - Checking off generated tasks while a progress bar tracks completion
//! - Switching between the light, dark and pink themes

mod app;
mod views;
mod widgets;

pub use app::{run_tui, TuiConfig};

/// Ellipsize text to fit within max_chars
pub fn ellipsize(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else if max_chars == 0 {
        String::new()
    } else {
        let take = max_chars.saturating_sub(1);
        let mut result = value.chars().take(take).collect::<String>();
        result.push('…');
        result
    }
}

/// Sanitize text by removing newlines for single-line display
pub fn sanitize_text(value: &str) -> String {
    value.replace(['\n', '\r'], " ")
}

/// Simple word-wrap for text
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in sanitize_text(text).split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.chars().count() + 1 + word.chars().count() <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.to_string();
        }
    }
    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("Design", 10), "Design");
        assert_eq!(ellipsize("Implement site", 6), "Imple…");
        assert_eq!(ellipsize("anything", 0), "");
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("Create mockups for\nthe landing page", 12),
            vec!["Create", "mockups for", "the landing", "page"]
        );
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
