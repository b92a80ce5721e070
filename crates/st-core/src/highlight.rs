//! Lightweight code highlighter for note blocks.
//!
//! Strings and line comments are masked before keywords are matched, so a
//! keyword inside `"..."` or after `//` is never styled.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""(.*?)""#).unwrap());

static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//.*").unwrap());

static KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(",
        "public|private|protected|class|void|int|long|double|char|String|new|return|if|else|",
        "for|while|static|abstract|interface|extends|implements|super|this|final|try|catch|",
        "finally|throw|throws|boolean|enum|import|package|null|true|false|",
        "SELECT|FROM|WHERE|JOIN|INNER|LEFT|RIGHT|OUTER|ON|GROUP|BY|ORDER|HAVING|INSERT|INTO|",
        "VALUES|UPDATE|SET|DELETE|CREATE|TABLE|INDEX|PRIMARY|KEY|FOREIGN|REFERENCES|AND|OR|",
        "NOT|NULL|AS|DISTINCT|LIMIT|UNION|BEGIN|COMMIT|ROLLBACK",
        r")\b"
    ))
    .unwrap()
});

// Mask markers. `escape_html` turns any literal occurrence into an entity, so
// only masks produced here match.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}(\d+)\x{E001}").unwrap());

/// Escape `&`, `<` and `>`, plus the two mask marker code points.
pub fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\u{E000}', "&#xE000;")
        .replace('\u{E001}', "&#xE001;")
}

#[derive(Default)]
struct Masks {
    spans: Vec<(String, &'static str)>,
}

impl Masks {
    fn mask(&mut self, text: &str, pattern: &Regex, class: &'static str) -> String {
        pattern
            .replace_all(text, |caps: &Captures| {
                // A comment may swallow an already-masked string; keep it plain.
                let raw = self.plain(&caps[0]);
                self.spans.push((raw, class));
                format!("\u{E000}{}\u{E001}", self.spans.len() - 1)
            })
            .into_owned()
    }

    fn plain(&self, text: &str) -> String {
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| self.lookup(caps, |raw, _| raw.to_owned()))
            .into_owned()
    }

    fn restore(&self, text: &str) -> String {
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| {
                self.lookup(caps, |raw, class| format!(r#"<span class="code-{class}">{raw}</span>"#))
            })
            .into_owned()
    }

    fn lookup(&self, caps: &Captures, render: impl Fn(&str, &str) -> String) -> String {
        caps[1]
            .parse::<usize>()
            .ok()
            .and_then(|idx| self.spans.get(idx))
            .map(|(raw, class)| render(raw, class))
            .unwrap_or_else(|| caps[0].to_owned())
    }
}

/// Escape `code` and wrap strings, comments and keywords in styled spans.
pub fn highlight(code: &str) -> String {
    let mut masks = Masks::default();
    let escaped = escape_html(code);
    let masked = masks.mask(&escaped, &STRING_LITERAL, "string");
    let masked = masks.mask(&masked, &LINE_COMMENT, "comment");
    let styled = KEYWORD.replace_all(&masked, r#"<span class="code-keyword">$1</span>"#);
    masks.restore(&styled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_metacharacters() {
        assert_eq!(escape_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn marker_shaped_source_text_is_not_a_mask() {
        let out = highlight("s = \"x\"; \u{E000}0\u{E001}");

        assert_eq!(
            out,
            r#"s = <span class="code-string">"x"</span>; &#xE000;0&#xE001;"#
        );
        assert_eq!(out.matches("code-string").count(), 1);
    }

    #[test]
    fn keywords_inside_strings_and_comments_stay_plain() {
        let out = highlight("String s = \"return\"; // return now\nreturn x;");

        assert!(out.contains(r#"<span class="code-string">"return"</span>"#));
        assert!(out.contains(r#"<span class="code-comment">// return now</span>"#));
        assert!(out.contains(r#"<span class="code-keyword">return</span> x;"#));
        assert!(out.starts_with(r#"<span class="code-keyword">String</span> s"#));
        assert_eq!(out.matches(r#"<span class="code-keyword">return</span>"#).count(), 1);
    }

    #[test]
    fn comment_swallows_string_without_nesting() {
        let out = highlight(r#"int x; // say "hi""#);

        assert_eq!(
            out,
            r#"<span class="code-keyword">int</span> x; <span class="code-comment">// say "hi"</span>"#
        );
    }

    #[test]
    fn slashes_inside_strings_are_not_comments() {
        let out = highlight(r#"url = "http://example.com";"#);

        assert_eq!(out, r#"url = <span class="code-string">"http://example.com"</span>;"#);
    }

    #[test]
    fn only_whole_words_are_keywords() {
        let out = highlight("returns interfaceName;");
        assert!(!out.contains("code-keyword"));
    }

    #[test]
    fn source_is_escaped_before_styling() {
        let out = highlight("List<String> xs;");
        assert_eq!(out, r#"List&lt;<span class="code-keyword">String</span>&gt; xs;"#);
    }

    #[test]
    fn sql_keywords_are_upper_case_only() {
        let out = highlight("SELECT name FROM users; select 1");
        assert!(out.starts_with(r#"<span class="code-keyword">SELECT</span> name <span class="code-keyword">FROM</span>"#));
        assert!(out.ends_with("select 1"));
    }
}
