//! Character-level scanning for macro invocations.
//!
//! Regexes cannot balance nested delimiters, so everything here is an
//! explicit scan over characters: comment stripping, locating
//! `marker(...)` calls, and splitting a call's argument list.

/// A single macro invocation found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCall {
    /// The unparsed text between the macro's outer parentheses.
    pub args_text: String,
    /// Byte offset of the macro name in the (comment-stripped) source.
    pub offset: usize,
}

/// Replace `/* ... */` block comments and `//` line comments with spaces.
///
/// Comment bytes become blanks and newlines are kept, so byte offsets and
/// line numbers in the stripped text match the original file. Double-quoted
/// string literals are honored; single quotes are not treated as string
/// openers here because lifetimes (`&'a str`) would swallow the rest of
/// the file.
pub fn strip_comments(source: &str) -> String {
    #[derive(PartialEq)]
    enum State {
        Code,
        Str,
        LineComment,
        BlockComment,
    }

    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut escaped = false;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '"' => {
                    state = State::Str;
                    escaped = false;
                    out.push(c);
                }
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::BlockComment;
                }
                _ => out.push(c),
            },
            State::Str => {
                out.push(c);
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    state = State::Code;
                }
            }
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                } else {
                    out.push(' ');
                }
            }
            State::BlockComment => {
                if c == '\n' {
                    out.push('\n');
                } else if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = State::Code;
                } else {
                    out.push(' ');
                }
            }
        }
    }

    out
}

/// Find every `marker(...)` invocation in `content`.
///
/// Scans forward from each occurrence of `marker(` with a paren depth
/// seeded at one, honoring quoted strings (with backslash escapes) so
/// parentheses inside string literals do not affect the depth. A call
/// whose closing parenthesis is never found is malformed: it is skipped
/// and scanning resumes just past the marker token.
pub fn extract_macro_calls(content: &str, marker: &str) -> Vec<RawCall> {
    let mut calls = Vec::new();
    let needle = format!("{marker}(");
    let mut idx = 0;

    while let Some(found) = content[idx..].find(&needle) {
        let start = idx + found;
        let body_start = start + needle.len();
        let mut depth = 1usize;
        let mut in_quote = false;
        let mut quote_char = '"';
        let mut prev = '\0';
        let mut buf = String::new();
        let mut end = None;

        for (off, c) in content[body_start..].char_indices() {
            if in_quote {
                buf.push(c);
                if c == quote_char && prev != '\\' {
                    in_quote = false;
                }
            } else {
                match c {
                    '"' | '\'' => {
                        in_quote = true;
                        quote_char = c;
                        buf.push(c);
                    }
                    '(' => {
                        depth += 1;
                        buf.push('(');
                    }
                    ')' => {
                        depth -= 1;
                        if depth == 0 {
                            end = Some(body_start + off);
                            break;
                        }
                        buf.push(')');
                    }
                    _ => buf.push(c),
                }
            }
            prev = c;
        }

        if let Some(close) = end {
            calls.push(RawCall {
                args_text: buf,
                offset: start,
            });
            idx = close + 1;
        } else {
            // Unbalanced call; resume past the marker so we never loop.
            idx = body_start;
        }
    }

    calls
}

/// 1-based line number of a byte offset.
pub fn line_of_offset(content: &str, offset: usize) -> usize {
    content[..offset.min(content.len())]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
        + 1
}

/// Split one call's raw argument text into trimmed top-level arguments.
///
/// Inline `//` comments are stripped and whitespace runs (newlines
/// included) collapse to single spaces, so multi-line calls parse the
/// same as single-line ones. Quoted arguments are emitted without their
/// quotes; unquoted runs split on commas only at paren and brace depth
/// zero. Empty unquoted arguments are dropped.
pub fn split_macro_args(raw: &str) -> Vec<String> {
    let cleaned = collapse_whitespace(&strip_inline_comments(raw));
    let chars: Vec<char> = cleaned.chars().collect();
    let n = chars.len();
    let mut args = Vec::new();
    let mut i = 0;

    while i < n {
        while i < n && chars[i].is_whitespace() {
            i += 1;
        }
        if i >= n {
            break;
        }

        if chars[i] == '"' || chars[i] == '\'' {
            let quote = chars[i];
            i += 1;
            let mut arg = String::new();
            while i < n {
                if chars[i] == '\\' && i + 1 < n {
                    arg.push(chars[i]);
                    arg.push(chars[i + 1]);
                    i += 2;
                } else if chars[i] == quote {
                    break;
                } else {
                    arg.push(chars[i]);
                    i += 1;
                }
            }
            args.push(arg);
            i += 1; // closing quote
        } else {
            let mut paren = 0i32;
            let mut brace = 0i32;
            let mut arg = String::new();
            while i < n {
                match chars[i] {
                    '(' => paren += 1,
                    ')' => paren -= 1,
                    '{' => brace += 1,
                    '}' => brace -= 1,
                    ',' if paren == 0 && brace == 0 => break,
                    _ => {}
                }
                arg.push(chars[i]);
                i += 1;
            }
            let arg = arg.trim();
            if !arg.is_empty() {
                args.push(arg.to_string());
            }
        }

        if i < n && chars[i] == ',' {
            i += 1;
        }
    }

    args
}

fn strip_inline_comments(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_quote: Option<char> = None;
    let mut escaped = false;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(quote) = in_quote {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                in_quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                in_quote = Some(c);
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                // Drop the rest of the line.
                for rest in chars.by_ref() {
                    if rest == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }

    out
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_space = false;
    for c in text.trim().chars() {
        if c.is_whitespace() {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
        } else {
            out.push(c);
            last_space = false;
        }
    }
    out
}
