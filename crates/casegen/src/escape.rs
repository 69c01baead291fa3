//! Literal quoting for every generated language.
//!
//! Every value that comes from the IR and lands inside generated source goes
//! through one of these functions. Emitters never concatenate raw IR text
//! into code, except in comments (through [`comment`]).

/// Target language of a string literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    /// JavaScript / TypeScript, single-quoted
    JavaScript,
    /// Python, single-quoted
    Python,
    /// Kotlin, double-quoted with `$` escaped
    Kotlin,
}

impl Lang {
    /// Quote `s` as a string literal of this language
    #[must_use]
    pub fn quote(self, s: &str) -> String {
        match self {
            Self::JavaScript => js(s),
            Self::Python => python(s),
            Self::Kotlin => kotlin(s),
        }
    }

    /// Line comment prefix
    #[must_use]
    pub const fn comment_prefix(self) -> &'static str {
        match self {
            Self::JavaScript | Self::Kotlin => "//",
            Self::Python => "#",
        }
    }
}

/// Single-quoted JavaScript/TypeScript string literal
#[must_use]
pub fn js(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Single-quoted Python string literal
#[must_use]
pub fn python(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Double-quoted Kotlin string literal (string templates disabled)
#[must_use]
pub fn kotlin(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Escape XML special characters; control characters XML 1.0 forbids are dropped
#[must_use]
pub fn xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Value of a CSS attribute selector, for use inside double quotes
#[must_use]
pub fn css_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' | '\r' => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// XPath 1.0 string literal.
///
/// XPath has no escape sequences, so a value containing both quote kinds is
/// built with `concat()`.
#[must_use]
pub fn xpath(s: &str) -> String {
    if !s.contains('"') {
        return format!("\"{s}\"");
    }
    if !s.contains('\'') {
        return format!("'{s}'");
    }
    let parts: Vec<String> = s
        .split('"')
        .map(|p| format!("\"{p}\""))
        .collect();
    format!("concat({})", parts.join(", '\"', "))
}

/// Text safe to place in a single-line comment of any generated language
#[must_use]
pub fn comment(s: &str) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let flat = flat.replace("*/", "* /");
    flat.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Triple-quoted Python docstring holding `s` on one line
#[must_use]
pub fn docstring(s: &str) -> String {
    let mut out = String::from("\"\"\"");
    for c in comment(s).chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }
    out.push_str("\"\"\"");
    out
}

/// `snake_case` identifier (Python functions, Locust tasks)
#[must_use]
pub fn snake_ident(s: &str) -> String {
    let words = ident_words(s);
    let ident = words.join("_");
    prefix_if_needed(ident, "case")
}

/// `lowerCamelCase` identifier (Kotlin test functions)
#[must_use]
pub fn camel_ident(s: &str) -> String {
    let words = ident_words(s);
    let mut ident = String::new();
    for (i, w) in words.iter().enumerate() {
        if i == 0 {
            ident.push_str(w);
        } else {
            let mut chars = w.chars();
            if let Some(first) = chars.next() {
                ident.extend(first.to_uppercase());
                ident.push_str(chars.as_str());
            }
        }
    }
    prefix_if_needed(ident, "case")
}

/// `UpperCamelCase` identifier (classes)
#[must_use]
pub fn pascal_ident(s: &str) -> String {
    let camel = camel_ident(s);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => camel,
    }
}

fn ident_words(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

fn prefix_if_needed(ident: String, fallback: &str) -> String {
    if ident.is_empty() {
        fallback.to_string()
    } else if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{fallback}_{ident}")
    } else {
        ident
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod literal_tests {
        use super::*;

        #[test]
        fn test_js_quotes_and_backslashes() {
            assert_eq!(js("it's"), r"'it\'s'");
            assert_eq!(js(r"C:\tmp"), r"'C:\\tmp'");
            assert_eq!(js("a\nb"), r"'a\nb'");
        }

        #[test]
        fn test_js_breakout_attempt_stays_inside_literal() {
            let lit = js("'); process.exit(1); ('");
            assert_eq!(lit, r"'\'); process.exit(1); (\''");
        }

        #[test]
        fn test_python_literal() {
            assert_eq!(python("O'Brien"), r"'O\'Brien'");
            assert_eq!(python("\u{1}"), r"'\x01'");
        }

        #[test]
        fn test_kotlin_disables_templates() {
            assert_eq!(kotlin("price $5 \"net\""), r#""price \$5 \"net\"""#);
        }

        #[test]
        fn test_lang_dispatch() {
            assert_eq!(Lang::JavaScript.quote("x"), "'x'");
            assert_eq!(Lang::Python.quote("x"), "'x'");
            assert_eq!(Lang::Kotlin.quote("x"), "\"x\"");
            assert_eq!(Lang::Python.comment_prefix(), "#");
        }
    }

    mod markup_tests {
        use super::*;

        #[test]
        fn test_xml_special_chars() {
            assert_eq!(xml("a & b"), "a &amp; b");
            assert_eq!(xml("<tag>"), "&lt;tag&gt;");
            assert_eq!(xml("\"quoted\""), "&quot;quoted&quot;");
            assert_eq!(xml("it's"), "it&apos;s");
            assert_eq!(xml("bell\u{7}"), "bell");
        }

        #[test]
        fn test_xpath_literal_forms() {
            assert_eq!(xpath("Save"), "\"Save\"");
            assert_eq!(xpath("say \"hi\""), "'say \"hi\"'");
            assert_eq!(
                xpath("it's \"x\""),
                "concat(\"it's \", '\"', \"x\", '\"', \"\")"
            );
        }

        #[test]
        fn test_css_attr() {
            assert_eq!(css_attr("a\"b"), "a\\\"b");
        }
    }

    #[test]
    fn test_comment_is_single_line() {
        assert_eq!(comment("line one\nline two */ x"), "line one line two * / x");
    }

    #[test]
    fn test_docstring_escapes_closing_quotes() {
        assert_eq!(docstring("Suite"), r#""""Suite""""#);
        assert_eq!(docstring(r"C:\temp\"), r#""""C:\\temp\\""""#);
        assert_eq!(docstring(r#"say "hi""#), r#""""say \"hi\"""""#);
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(snake_ident("Login with valid credentials!"), "login_with_valid_credentials");
        assert_eq!(camel_ident("Login with valid credentials"), "loginWithValidCredentials");
        assert_eq!(pascal_ident("checkout flow"), "CheckoutFlow");
        assert_eq!(snake_ident("404 page"), "case_404_page");
        assert_eq!(snake_ident("!!!"), "case");
    }
}
