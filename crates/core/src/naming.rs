//! Naming rules that turn a documentation file name into a tool identity.
//!
//! All functions here are pure: the same file name always yields the same
//! identifier, topic and description.

use crate::catalog::MARKDOWN_EXTENSION;

/// Product the documentation describes. Appears in every tool description.
pub const PRODUCT_NAME: &str = "Strands Agents";

/// Character that separates words in a file name.
pub const WORD_SEPARATOR: char = '_';

/// Tool identifier for a file name: the name without its markdown extension.
///
/// Names without the extension are returned unchanged.
pub fn tool_identifier(file_name: &str) -> &str {
    file_name
        .strip_suffix(MARKDOWN_EXTENSION)
        .unwrap_or(file_name)
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase()
}

/// Human readable topic for an identifier.
///
/// Separators become spaces, then every cased letter that starts a run of
/// cased letters is upper-cased and the rest of the run lower-cased. Digits,
/// punctuation and uncased scripts are left alone but break runs, so `v2_api`
/// becomes `V2 Api`.
pub fn topic(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    let mut prev_is_cased = false;

    for c in identifier.chars() {
        let c = if c == WORD_SEPARATOR { ' ' } else { c };
        if prev_is_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_cased = is_cased(c);
    }

    out
}

/// Tool description for an identifier.
pub fn description(identifier: &str) -> String {
    format!(
        "Documentation on {} in {}.",
        topic(identifier),
        PRODUCT_NAME
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_identifier_strips_extension() {
        assert_eq!(tool_identifier("quickstart.md"), "quickstart");
        assert_eq!(tool_identifier("b_c.md"), "b_c");
        assert_eq!(tool_identifier("release.notes.md"), "release.notes");
    }

    #[test]
    fn test_tool_identifier_without_extension() {
        assert_eq!(tool_identifier("README"), "README");
        assert_eq!(tool_identifier("notes.txt"), "notes.txt");
    }

    #[test]
    fn test_topic_title_cases_words() {
        assert_eq!(topic("b_c"), "B C");
        assert_eq!(topic("model_providers"), "Model Providers");
        assert_eq!(topic("quickstart"), "Quickstart");
        assert_eq!(topic("MCP_tools"), "Mcp Tools");
    }

    #[test]
    fn test_topic_non_letters_break_words() {
        assert_eq!(topic("v2_api"), "V2 Api");
        assert_eq!(topic("multi-agent"), "Multi-Agent");
        assert_eq!(topic("2nd_pass"), "2Nd Pass");
    }

    #[test]
    fn test_topic_uncased_letters_break_words() {
        assert_eq!(topic("\u{65e5}\u{672c}_docs"), "\u{65e5}\u{672c} Docs");
        assert_eq!(topic("\u{65e5}docs"), "\u{65e5}Docs");
        assert_eq!(topic("caf\u{c9}_\u{e9}t\u{e9}"), "Caf\u{e9} \u{c9}t\u{e9}");
    }

    #[test]
    fn test_description() {
        assert_eq!(description("b_c"), "Documentation on B C in Strands Agents.");
        assert_eq!(
            description("quickstart"),
            "Documentation on Quickstart in Strands Agents."
        );
    }
}
