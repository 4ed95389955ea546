//! Configuration string tokenizer
//!
//! Splits a configuration string into shell-like tokens and performs the
//! inverse quoting. Only the outermost quoting is interpreted; a quoted token
//! may hold a complete nested configuration string, which stays untouched
//! until it is split again at its own level.

use contracts::ContractError;

/// Split a configuration string into tokens
///
/// Whitespace separates tokens. A token starting with `"` or `'` runs until the
/// matching unescaped quote and may contain whitespace; inside quotes `\"`,
/// `\'`, `\\`, `\n`, `\t` and `\r` are unescaped. Outside quotes every
/// character is literal.
///
/// # Errors
/// `MalformedConfig` on an unterminated quote or on characters glued to a
/// closing quote.
pub fn split_options(raw: &str) -> Result<Vec<String>, ContractError> {
    let mut tokens = Vec::new();
    let mut current: Option<String> = None;
    let mut chars = raw.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c.is_whitespace() {
            if let Some(token) = current.take() {
                tokens.push(token);
            }
            continue;
        }

        if current.is_none() && (c == '"' || c == '\'') {
            let mut token = String::new();
            let mut closed = false;
            while let Some((_, q)) = chars.next() {
                match q {
                    '\\' => {
                        let Some((_, escaped)) = chars.next() else {
                            break;
                        };
                        token.push(unescape(escaped));
                    }
                    _ if q == c => {
                        closed = true;
                        break;
                    }
                    _ => token.push(q),
                }
            }
            if !closed {
                return Err(ContractError::malformed(format!(
                    "unterminated quote starting at offset {pos}"
                )));
            }
            if let Some((after, next)) = chars.peek() {
                if !next.is_whitespace() {
                    return Err(ContractError::malformed(format!(
                        "unexpected '{next}' after closing quote at offset {after}"
                    )));
                }
            }
            tokens.push(token);
            continue;
        }

        current.get_or_insert_with(String::new).push(c);
    }

    if let Some(token) = current {
        tokens.push(token);
    }

    Ok(tokens)
}

/// Quote a single token so that `split_options` gives it back unchanged
pub fn quote(token: &str) -> String {
    if !needs_quoting(token) {
        return token.to_string();
    }

    let mut quoted = String::with_capacity(token.len() + 2);
    quoted.push('"');
    for c in token.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Join tokens into a configuration string, quoting where needed
pub fn join_options<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|t| quote(t.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn needs_quoting(token: &str) -> bool {
    token.is_empty()
        || token
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '\'')
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    }
}
