//! Slug derivation for post titles and task names.

use std::sync::OnceLock;

use regex::Regex;

fn strip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s-]").expect("static slug regex"))
}

fn collapse_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-\s]+").expect("static slug regex"))
}

/// Turn a human-readable title into a lowercase, hyphen-separated token.
///
/// Non-ASCII letters are folded to their closest ASCII spelling first, so
/// accented letters keep their base letter. Punctuation other than `-` and
/// `_` is then removed, and runs of whitespace or hyphens collapse into one
/// hyphen. The result is empty when nothing alphanumeric survives.
/// No disambiguation happens here: two titles that normalise the same way
/// produce the same slug and the store rejects the second one.
///
/// ```
/// use supertodo::slug::slugify;
///
/// assert_eq!(slugify("A new task name"), "a-new-task-name");
/// assert_eq!(slugify("  Hello,   World!  "), "hello-world");
/// assert_eq!(slugify("Añadir tarea"), "anadir-tarea");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = fold_to_ascii(text);
    let lowered = ascii.to_lowercase();
    let stripped = strip_re().replace_all(&lowered, "");
    let collapsed = collapse_re().replace_all(&stripped, "-");
    collapsed.trim_matches(|c| c == '-' || c == '_').to_string()
}

// Each non-ASCII char goes through the `slug` crate's transliteration table
// on its own, so ASCII punctuation still follows the rules above.
fn fold_to_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            out.push_str(&::slug::slugify(c.to_string()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("A task name"), "a-task-name");
        assert_eq!(slugify("A new task name"), "a-new-task-name");
    }

    #[test]
    fn strips_punctuation_and_collapses_separators() {
        assert_eq!(slugify("Checkout Flow!"), "checkout-flow");
        assert_eq!(slugify("one -- two   three"), "one-two-three");
        assert_eq!(slugify("--edge--"), "edge");
    }

    #[test]
    fn keeps_digits_and_underscores() {
        assert_eq!(slugify("Test 123"), "test-123");
        assert_eq!(slugify("snake_case title"), "snake_case-title");
    }

    #[test]
    fn folds_accented_letters() {
        assert_eq!(slugify("Añadir tarea"), "anadir-tarea");
        assert_eq!(slugify("Canción rápida"), "cancion-rapida");
        assert_eq!(slugify("Über größe"), "uber-grosse");
    }

    #[test]
    fn is_deterministic() {
        let title = "Same Title, Twice";
        assert_eq!(slugify(title), slugify(title));
    }

    #[test]
    fn nothing_alphanumeric_gives_empty_slug() {
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!!!"), "");
    }
}
