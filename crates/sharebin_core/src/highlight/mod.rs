//! Syntax highlighting capability: language detection plus markup rendering.
//!
//! `highlight` detects and renders in one step; `rehighlight` renders with a
//! stored language tag, trusting it over re-detection. Both are best-effort:
//! unknown or unresolvable languages fall back to a plain-text rendering
//! rather than failing.

mod detect;

pub use detect::detect_language;

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

const THEME_KEY: &str = "InspiredGitHub";

/// Result of highlighting a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    /// Best-guess canonical language tag, when detection was confident.
    pub language: Option<String>,
    /// HTML rendering of the text.
    pub markup: String,
}

/// Reusable highlighter holding loaded grammar and theme sets.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Load the bundled grammar and theme sets.
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
        }
    }

    /// Detect the language of `text` and render markup for it.
    ///
    /// Deterministic for identical input.
    ///
    /// # Returns
    /// The detected language (if any) and the rendered markup.
    pub fn highlight(&self, text: &str) -> Highlighted {
        let language = detect::detect_language(text);
        let markup = self.render(text, language.as_deref());
        Highlighted { language, markup }
    }

    /// Render markup trusting a stored language tag over re-detection.
    ///
    /// # Returns
    /// The canonicalized tag that was used and the rendered markup.
    pub fn rehighlight(&self, text: &str, language: Option<&str>) -> Highlighted {
        let language = language.map(canonicalize).filter(|l| !l.is_empty());
        let markup = self.render(text, language.as_deref());
        Highlighted { language, markup }
    }

    fn render(&self, text: &str, language: Option<&str>) -> String {
        let syntax = self.resolve_syntax(language.unwrap_or(""));
        match highlighted_html_for_string(text, &self.syntaxes, syntax, self.theme()) {
            Ok(markup) => markup,
            Err(err) => {
                tracing::warn!("highlight render failed, falling back to plain: {}", err);
                let plain = self.syntaxes.find_syntax_plain_text();
                highlighted_html_for_string(text, &self.syntaxes, plain, self.theme())
                    .unwrap_or_default()
            }
        }
    }

    fn theme(&self) -> &Theme {
        // The bundled theme set always ships THEME_KEY.
        self.themes
            .themes
            .get(THEME_KEY)
            .or_else(|| self.themes.themes.values().next())
            .expect("bundled syntect themes are not empty")
    }

    /// Resolve a grammar from a canonical hint, trying fallback candidates
    /// before giving up on plain text.
    fn resolve_syntax(&self, hint: &str) -> &SyntaxReference {
        let hint = hint.trim();
        if hint.is_empty() {
            return self.syntaxes.find_syntax_plain_text();
        }

        let canonical = canonicalize(hint);
        if matches!(canonical.as_str(), "text") {
            return self.syntaxes.find_syntax_plain_text();
        }

        if let Some(syntax) = self.try_candidate(&canonical) {
            return syntax;
        }
        for candidate in fallback_candidates(&canonical) {
            if let Some(syntax) = self.try_candidate(candidate) {
                return syntax;
            }
        }

        self.syntaxes.find_syntax_plain_text()
    }

    fn try_candidate(&self, candidate: &str) -> Option<&SyntaxReference> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some(syntax) = self.syntaxes.find_syntax_by_name(trimmed) {
            return Some(syntax);
        }
        if let Some(syntax) = self.syntaxes.find_syntax_by_extension(trimmed) {
            return Some(syntax);
        }

        self.syntaxes
            .syntaxes()
            .iter()
            .find(|syntax| syntax.name.eq_ignore_ascii_case(trimmed))
    }
}

/// Convert aliases to canonical lowercase labels.
///
/// # Returns
/// Canonical label (or empty string for empty/whitespace input).
pub fn canonicalize(language: &str) -> String {
    let lowered = language.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "c++" => "cpp".to_string(),
        "c#" | "csharp" => "cs".to_string(),
        "bash" | "sh" | "zsh" => "shell".to_string(),
        "yml" => "yaml".to_string(),
        "js" => "javascript".to_string(),
        "ts" => "typescript".to_string(),
        "md" => "markdown".to_string(),
        "plaintext" | "plain" | "txt" => "text".to_string(),
        "py" => "python".to_string(),
        "rs" => "rust".to_string(),
        _ => lowered,
    }
}

fn fallback_candidates(hint: &str) -> &'static [&'static str] {
    match hint {
        "shell" => &["bash", "sh"],
        "cpp" => &["C++", "cc"],
        "cs" => &["C#"],
        "typescript" => &["JavaScript", "js"],
        "toml" => &["YAML", "yaml"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlighting_is_deterministic() {
        let highlighter = Highlighter::new();
        let text = "fn main() {\n    let x = 1;\n}\n";
        let first = highlighter.highlight(text);
        let second = highlighter.highlight(text);
        assert_eq!(first.language, second.language);
        assert_eq!(first.markup, second.markup);
    }

    #[test]
    fn rehighlight_trusts_the_stored_tag() {
        let highlighter = Highlighter::new();
        // Looks like Rust, but the stored tag says Python; the tag wins.
        let out = highlighter.rehighlight("fn main() {\n    let x = 1;\n}\n", Some("python"));
        assert_eq!(out.language.as_deref(), Some("python"));
        assert!(!out.markup.is_empty());
    }

    #[test]
    fn unknown_language_falls_back_to_plain_markup() {
        let highlighter = Highlighter::new();
        let out = highlighter.rehighlight("hello there\n", Some("klingon"));
        assert!(!out.markup.is_empty());
    }

    #[test]
    fn empty_language_renders_plain() {
        let highlighter = Highlighter::new();
        let out = highlighter.rehighlight("plain body\n", None);
        assert!(out.language.is_none());
        assert!(out.markup.contains("plain body"));
    }

    #[test]
    fn canonicalize_maps_common_aliases() {
        assert_eq!(canonicalize("RS"), "rust");
        assert_eq!(canonicalize("bash"), "shell");
        assert_eq!(canonicalize(" yml "), "yaml");
        assert_eq!(canonicalize("plaintext"), "text");
        assert_eq!(canonicalize(""), "");
    }
}
