//! CSS selector string building.
//!
//! Every strategy builds its selector through [`SelectorBuilder`], so the
//! escaping rules live in one place: identifiers follow `CSS.escape()` and
//! attribute values are emitted double-quoted.

use std::fmt::Write as FmtWrite;

/// Escapes an identifier (id, class or attribute name) like `CSS.escape()`.
pub fn escape_identifier(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let chars: Vec<char> = value.chars().collect();
    let first = chars.first().copied();

    for (index, &ch) in chars.iter().enumerate() {
        let code = ch as u32;
        if ch == '\0' {
            out.push('\u{FFFD}');
        } else if (0x01..=0x1F).contains(&code)
            || code == 0x7F
            || (index == 0 && ch.is_ascii_digit())
            || (index == 1 && ch.is_ascii_digit() && first == Some('-'))
        {
            write!(out, "\\{:x} ", code).ok();
        } else if index == 0 && ch == '-' && chars.len() == 1 {
            out.push_str("\\-");
        } else if code >= 0x80 || ch == '-' || ch == '_' || ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}

/// Escapes an attribute value for use inside double quotes.
pub fn escape_attribute_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\a "),
            '\r' => out.push_str("\\d "),
            '\0' => out.push('\u{FFFD}'),
            _ => out.push(ch),
        }
    }
    out
}

/// Incremental builder for one compound selector (a single level).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorBuilder {
    text: String,
}

impl SelectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a lower-case tag name.
    pub fn tag(tag: &str) -> Self {
        Self {
            text: tag.to_ascii_lowercase(),
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.text.push('#');
        self.text.push_str(&escape_identifier(id));
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.text.push('.');
        self.text.push_str(&escape_identifier(class));
        self
    }

    pub fn classes<I, S>(self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        classes
            .into_iter()
            .fold(self, |builder, class| builder.class(class.as_ref()))
    }

    /// `[name="value"]`
    pub fn attribute(self, name: &str, value: &str) -> Self {
        self.attribute_with(name, "=", value)
    }

    /// `[name*="value"]`
    pub fn attribute_contains(self, name: &str, value: &str) -> Self {
        self.attribute_with(name, "*=", value)
    }

    fn attribute_with(mut self, name: &str, operator: &str, value: &str) -> Self {
        write!(
            self.text,
            "[{}{}\"{}\"]",
            escape_identifier(name),
            operator,
            escape_attribute_value(value)
        )
        .ok();
        self
    }

    pub fn nth_child(mut self, position: usize) -> Self {
        write!(self.text, ":nth-child({position})").ok();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn build(self) -> String {
        self.text
    }
}

/// Joins levels with the descendant combinator.
pub fn join_descendant<S: AsRef<str>>(levels: &[S]) -> String {
    join_with(levels, " ")
}

/// Joins levels with the child combinator.
pub fn join_child<S: AsRef<str>>(levels: &[S]) -> String {
    join_with(levels, " > ")
}

fn join_with<S: AsRef<str>>(levels: &[S], separator: &str) -> String {
    levels
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifiers_pass_through() {
        assert_eq!(escape_identifier("submit-btn"), "submit-btn");
        assert_eq!(escape_identifier("_private"), "_private");
        assert_eq!(escape_identifier("caf\u{e9}"), "caf\u{e9}");
    }

    #[test]
    fn leading_digits_are_hex_escaped() {
        assert_eq!(escape_identifier("123"), "\\31 23");
        assert_eq!(escape_identifier("-1a"), "-\\31 a");
        assert_eq!(escape_identifier("-"), "\\-");
    }

    #[test]
    fn punctuation_is_backslash_escaped() {
        assert_eq!(escape_identifier("md:flex"), "md\\:flex");
        assert_eq!(escape_identifier("w-1/2"), "w-1\\/2");
        assert_eq!(escape_identifier("a b"), "a\\ b");
    }

    #[test]
    fn attribute_values_escape_quotes_and_backslashes() {
        assert_eq!(escape_attribute_value(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_attribute_value(r"C:\tmp"), r"C:\\tmp");
    }

    #[test]
    fn builder_composes_levels() {
        let level = SelectorBuilder::tag("BUTTON")
            .class("btn")
            .attribute("data-testid", "submit")
            .nth_child(2)
            .build();
        assert_eq!(level, r#"button.btn[data-testid="submit"]:nth-child(2)"#);

        let id = SelectorBuilder::new().id("main-nav").build();
        assert_eq!(id, "#main-nav");

        let contains = SelectorBuilder::tag("a")
            .attribute_contains("class", "primary")
            .build();
        assert_eq!(contains, r#"a[class*="primary"]"#);
    }

    #[test]
    fn joins_use_css_combinators() {
        assert_eq!(join_descendant(&["form", "button"]), "form button");
        assert_eq!(join_child(&["ul", "li:nth-child(2)"]), "ul > li:nth-child(2)");
        assert_eq!(join_child::<&str>(&[]), "");
    }
}
