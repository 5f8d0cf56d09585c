//! Heuristic language detection for paste content.

/// Best-effort language detection over a bounded sample of the content.
///
/// # Returns
/// Canonical lowercase label when a strong pattern is found, otherwise `None`
/// (callers render plain text).
pub fn detect_language(content: &str) -> Option<String> {
    const SAMPLE_MAX_BYTES: usize = 64 * 1024;

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }
    let sample = utf8_prefix(trimmed, SAMPLE_MAX_BYTES);
    let lower = sample.to_ascii_lowercase();

    if let Some(interpreter) = shebang_interpreter(sample) {
        match interpreter {
            "python" | "python2" | "python3" => return Some("python".to_string()),
            "node" | "nodejs" | "deno" | "bun" => return Some("javascript".to_string()),
            "sh" | "bash" | "zsh" | "dash" | "fish" => return Some("shell".to_string()),
            "perl" => return Some("perl".to_string()),
            _ => {}
        }
    }

    // JSON: structural check without full parsing.
    if (sample.starts_with('{') || sample.starts_with('['))
        && sample.contains('"')
        && (sample.contains(':') || sample.starts_with('['))
        && (sample.ends_with('}') || sample.ends_with(']'))
    {
        return Some("json".to_string());
    }

    if lower.contains("<!doctype html") || lower.contains("<html") {
        return Some("html".to_string());
    }
    if lower.starts_with("<?xml") {
        return Some("xml".to_string());
    }

    // Keyword tables: two independent hits make a guess.
    let tables: &[(&str, &[&str])] = &[
        (
            "rust",
            &["fn ", "impl ", "let ", "pub ", "struct ", "use ", "match "],
        ),
        (
            "python",
            &["def ", "import ", "elif ", "class ", "print(", "lambda "],
        ),
        ("go", &["package ", "func ", "import (", ":=", "go func"]),
        (
            "javascript",
            &["function ", "const ", "=> ", "var ", "console.log"],
        ),
        (
            "sql",
            &["select ", "insert ", "update ", "delete ", "from ", "where "],
        ),
        ("shell", &["echo ", "\nfi", "\ndone", "if [", "esac"]),
    ];
    for (lang, keywords) in tables {
        let hits = keywords.iter().filter(|kw| lower.contains(*kw)).count();
        if hits >= 2 {
            return Some((*lang).to_string());
        }
    }

    if looks_like_yaml(sample) {
        return Some("yaml".to_string());
    }

    None
}

fn shebang_interpreter(sample: &str) -> Option<&str> {
    let first = sample.lines().next()?;
    let rest = first.strip_prefix("#!")?;
    let mut parts = rest.split_whitespace();
    let path = parts.next()?;
    let command = path.rsplit('/').next()?;
    if command == "env" {
        return parts.next();
    }
    Some(command)
}

/// Every meaningful line must look like a mapping or a sequence entry.
fn looks_like_yaml(sample: &str) -> bool {
    let mut entries = 0usize;
    for line in sample.lines().take(64) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == "---" {
            continue;
        }
        let mapping = trimmed.split_once(':').is_some_and(|(key, value)| {
            !key.trim().is_empty()
                && !key.contains(char::is_whitespace)
                && (value.is_empty() || value.starts_with(' '))
        });
        if mapping || trimmed.starts_with("- ") {
            entries += 1;
        } else {
            return false;
        }
    }
    entries >= 2
}

fn utf8_prefix(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
