//! Conservative JavaScript minifier
//!
//! Removes comments and collapses whitespace. String, template and regular
//! expression literals are copied untouched. A line break is kept wherever it
//! separates two tokens that automatic semicolon insertion could care about, so
//! the output parses the same way as the input.

use anyhow::Context;
use brisk_plugin_protocol::{Artifact, Minifier};

/// Keywords after which `/` starts a regular expression rather than a division
const REGEX_PREFIX_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case", "do",
    "else", "yield", "await",
];

/// The built-in [`Minifier`]: writes `<stem><suffix>` next to the bundle
pub struct JsMinifier {
    suffix: String,
}

impl JsMinifier {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl Default for JsMinifier {
    fn default() -> Self {
        Self::new("-min.js")
    }
}

impl Minifier for JsMinifier {
    fn name(&self) -> &str {
        "js-minify"
    }

    fn minify(&self, artifact: &Artifact) -> anyhow::Result<Artifact> {
        let source = std::str::from_utf8(&artifact.contents)
            .with_context(|| format!("{} is not valid UTF-8", artifact.name))?;

        Ok(Artifact::new(
            format!("{}{}", artifact.stem(), self.suffix),
            minify_js(source),
        ))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Gap {
    #[default]
    None,
    Space,
    Newline,
}

/// Keywords whose parenthesized head can be followed by a statement
const STATEMENT_HEAD_KEYWORDS: &[&str] = &["if", "while", "for", "with"];

#[derive(Default)]
struct Output {
    out: String,
    pending: Gap,
    /// The last token was an identifier ending in a `\u` escape
    after_escape: bool,
    /// For each open `(`: does it start a statement head
    parens: Vec<bool>,
    /// The last `)` closed a statement head, so a statement follows it
    closed_head: bool,
}

impl Output {
    fn gap(&mut self, gap: Gap) {
        self.pending = self.pending.max(gap);
    }

    fn last(&self) -> Option<char> {
        self.out.chars().next_back()
    }

    fn last_word(&self) -> String {
        let mut word: Vec<char> = self
            .out
            .chars()
            .rev()
            .take_while(|c| is_ident_char(*c))
            .collect();
        word.reverse();
        word.into_iter().collect()
    }

    /// Emit a punctuator or identifier character
    fn push(&mut self, c: char) {
        match c {
            '(' => {
                let head = STATEMENT_HEAD_KEYWORDS.contains(&self.last_word().as_str());
                self.parens.push(head);
            }
            ')' => self.closed_head = self.parens.pop().unwrap_or(false),
            _ => {}
        }
        self.out.push(c);
    }

    /// Emit the pending whitespace, if any is needed before `next`
    fn flush(&mut self, next: char) {
        let gap = std::mem::replace(&mut self.pending, Gap::None);
        let after_escape = std::mem::take(&mut self.after_escape);
        let Some(prev) = self.last() else {
            return;
        };

        match gap {
            Gap::None => {}
            Gap::Newline => {
                let separated = matches!(prev, '{' | ';' | ',' | '(' | '[')
                    || matches!(next, '}' | ')' | ']' | ',' | ';');
                if !separated {
                    self.out.push('\n');
                }
            }
            Gap::Space => {
                if needs_space(is_ident_char(prev) || after_escape, prev, next) {
                    self.out.push(' ');
                }
            }
        }
    }

    fn regex_allowed(&self) -> bool {
        let Some(prev) = self.last() else {
            return true;
        };

        if self.after_escape {
            return false;
        }
        if is_ident_char(prev) {
            return REGEX_PREFIX_KEYWORDS.contains(&self.last_word().as_str());
        }
        if prev == ')' {
            return self.closed_head;
        }

        matches!(
            prev,
            '(' | ','
                | '='
                | ':'
                | '['
                | '!'
                | '&'
                | '|'
                | '?'
                | '{'
                | '}'
                | ';'
                | '+'
                | '-'
                | '*'
                | '%'
                | '<'
                | '>'
                | '~'
                | '^'
        )
    }
}

/// Minify JavaScript source text
pub fn minify_js(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut output = Output {
        out: String::with_capacity(source.len()),
        ..Output::default()
    };

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match c {
            c if is_line_terminator(c) => {
                output.gap(Gap::Newline);
                i += 1;
            }
            c if c.is_whitespace() => {
                output.gap(Gap::Space);
                i += 1;
            }
            '/' if next == Some('/') => {
                i = skip_line_comment(&chars, i);
            }
            '/' if next == Some('*') => {
                let (end, spans_lines) = skip_block_comment(&chars, i);
                output.gap(if spans_lines { Gap::Newline } else { Gap::Space });
                i = end;
            }
            '\'' | '"' => {
                output.flush(c);
                i = copy_quoted(&chars, i, &mut output.out);
            }
            '`' => {
                output.flush(c);
                i = copy_template(&chars, i, &mut output.out);
            }
            '/' if output.regex_allowed() => {
                output.flush(c);
                i = copy_regex(&chars, i, &mut output.out);
            }
            '\\' => {
                output.flush(c);
                i = copy_identifier_escape(&chars, i, &mut output.out);
                output.after_escape = true;
            }
            _ => {
                output.flush(c);
                output.push(c);
                i += 1;
            }
        }
    }

    output.out
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || !c.is_ascii()
}

fn needs_space(prev_ident: bool, prev: char, next: char) -> bool {
    (prev_ident && (is_ident_char(next) || next == '\\'))
        || (prev == '+' && next == '+')
        || (prev == '-' && next == '-')
        || (prev == '/' && (next == '/' || next == '*'))
        || (prev.is_ascii_digit() && next == '.')
}

/// Copies a `\\uXXXX` or `\\u{...}` escape inside an identifier
fn copy_identifier_escape(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('\\');
    let mut i = start + 1;
    if chars.get(i) != Some(&'u') {
        return i;
    }
    out.push('u');
    i += 1;

    if chars.get(i) == Some(&'{') {
        while let Some(&c) = chars.get(i) {
            out.push(c);
            i += 1;
            if c == '}' {
                break;
            }
        }
    } else {
        while let Some(&c) = chars.get(i) {
            if !c.is_ascii_hexdigit() || i >= start + 6 {
                break;
            }
            out.push(c);
            i += 1;
        }
    }
    i
}

fn skip_line_comment(chars: &[char], start: usize) -> usize {
    let mut i = start;
    while i < chars.len() && !is_line_terminator(chars[i]) {
        i += 1;
    }
    i
}

/// Returns the index after `*/` and whether the comment contained a line break
fn skip_block_comment(chars: &[char], start: usize) -> (usize, bool) {
    let mut i = start + 2;
    let mut spans_lines = false;
    while i + 1 < chars.len() {
        if chars[i] == '*' && chars[i + 1] == '/' {
            return (i + 2, spans_lines);
        }
        spans_lines |= is_line_terminator(chars[i]);
        i += 1;
    }
    (chars.len(), spans_lines)
}

fn copy_quoted(chars: &[char], start: usize, out: &mut String) -> usize {
    let quote = chars[start];
    out.push(quote);
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        i += 1;
        match c {
            '\\' => {
                if let Some(escaped) = chars.get(i) {
                    out.push(*escaped);
                    i += 1;
                }
            }
            c if c == quote => break,
            '\n' => break,
            _ => {}
        }
    }
    i
}

fn copy_template(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('`');
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.get(i + 1) {
                    out.push(*escaped);
                }
                i += 2;
            }
            '`' => {
                out.push(c);
                return i + 1;
            }
            '$' if chars.get(i + 1) == Some(&'{') => {
                out.push_str("${");
                i = copy_template_expression(chars, i + 2, out);
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }
    i
}

/// Copies a `${ ... }` substitution verbatim, including nested literals
fn copy_template_expression(chars: &[char], start: usize, out: &mut String) -> usize {
    let mut depth = 1;
    let mut i = start;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '\'' | '"' => i = copy_quoted(chars, i, out),
            '`' => i = copy_template(chars, i, out),
            '{' => {
                depth += 1;
                out.push(c);
                i += 1;
            }
            '}' => {
                depth -= 1;
                out.push(c);
                i += 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }
    i
}

fn copy_regex(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('/');
    let mut i = start + 1;
    let mut in_class = false;
    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        i += 1;
        match c {
            '\\' => {
                if let Some(escaped) = chars.get(i) {
                    out.push(*escaped);
                    i += 1;
                }
            }
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => break,
            c if is_line_terminator(c) => break,
            _ => {}
        }
    }
    i
}
