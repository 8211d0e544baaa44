//! Cleans generated free text for display.
//!
//! Markdown emphasis, headings, code ticks, table pipes and bullet glyphs are
//! dropped, runs of spaces collapse to one, tabs and carriage returns go away.
//! Newlines are kept as-is because the client renders paragraphs from them.

use regex::Regex;
use std::sync::OnceLock;

fn markup_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[*#`|\x{2022}\x{25CF}\x{25AA}\t\r]").expect("valid regex"))
}

fn repeated_spaces() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" {2,}").expect("valid regex"))
}

pub fn sanitize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let stripped = markup_chars().replace_all(text, "");
    let collapsed = repeated_spaces().replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_markdown() {
        let cleaned = sanitize("**Bold** #Heading");
        assert!(!cleaned.contains('*'));
        assert!(!cleaned.contains('#'));
        assert_eq!(cleaned, "Bold Heading");
    }

    #[test]
    fn test_keeps_newlines() {
        let input = "## Day 1\n\n• Beach walk\r\n| Lunch | ₹500 |\n\tEvening   market";
        let cleaned = sanitize(input);
        assert_eq!(cleaned, "Day 1\n\n Beach walk\n Lunch ₹500 \nEvening market");
        assert_eq!(
            cleaned.matches('\n').count(),
            input.matches('\n').count()
        );
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "plain text",
            "  * item one\n  * item two  ",
            "`code`  and   ||pipes||\n\n\n# Title",
            "\u{25CF} a \u{25AA} b \u{2022} c",
            "trailing spaces  \n  leading spaces",
            "\t\r\n\t",
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_clean_text_unchanged() {
        let clean = "Goa is known for beaches.\nVisit Fort Aguada at sunset.";
        assert_eq!(sanitize(clean), clean);
    }
}
