//! Placeholder tokenizer for event text.
//!
//! The alphabet is fixed: `{P1}` through `{P10}` name participant slots and
//! `{O}` names an object. Anything else, including malformed or
//! out-of-range braces such as `{P0}` or `{P11}`, is literal text.
//!
//! ```
//! use arena_sim::events::placeholder::{highest_slot, render};
//!
//! let text = "{P1} hits {P2} with a {O}.";
//! assert_eq!(highest_slot(text), Some(2));
//! assert_eq!(render(text, &["Cato", "Rue"], "rock"), "Cato hits Rue with a rock.");
//! ```

/// Highest participant slot a template may reference.
pub const MAX_SLOTS: u8 = 10;

/// A piece of template text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text.
    Text(&'a str),
    /// Participant slot, 1-based.
    Slot(u8),
    /// The object placeholder.
    Object,
}

/// Iterator over the tokens of a template text.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    rest: &'a str,
}

/// Tokenize template text.
#[must_use]
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { rest: text }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        if let Some((token, len)) = placeholder_at_start(self.rest) {
            self.rest = &self.rest[len..];
            return Some(token);
        }

        // Literal run up to the next brace that could open a placeholder.
        let skip = self.rest.chars().next().map_or(0, char::len_utf8);
        let end = self.rest[skip..]
            .find('{')
            .map_or(self.rest.len(), |i| i + skip);
        let (text, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Token::Text(text))
    }
}

/// Parse a placeholder at the start of `s`, returning it and its byte length.
fn placeholder_at_start(s: &str) -> Option<(Token<'_>, usize)> {
    if s.starts_with("{O}") {
        return Some((Token::Object, 3));
    }

    let body = s.strip_prefix("{P")?;
    let close = body.find('}')?;
    let digits = &body[..close];
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.starts_with('0') {
        return None;
    }

    let slot: u8 = digits.parse().ok()?;
    if (1..=MAX_SLOTS).contains(&slot) {
        Some((Token::Slot(slot), close + 3))
    } else {
        None
    }
}

/// Highest participant slot referenced, or `None` when there are none.
#[must_use]
pub fn highest_slot(text: &str) -> Option<u8> {
    tokenize(text)
        .filter_map(|t| match t {
            Token::Slot(n) => Some(n),
            _ => None,
        })
        .max()
}

/// Does the text contain an object placeholder?
#[must_use]
pub fn mentions_object(text: &str) -> bool {
    tokenize(text).any(|t| t == Token::Object)
}

/// Substitute slot names (in slot order) and the object into `text`.
///
/// Slots without a corresponding name are left as written.
#[must_use]
pub fn render<S: AsRef<str>>(text: &str, names: &[S], object: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for token in tokenize(text) {
        match token {
            Token::Text(s) => out.push_str(s),
            Token::Object => out.push_str(object),
            Token::Slot(n) => match names.get(usize::from(n) - 1) {
                Some(name) => out.push_str(name.as_ref()),
                None => {
                    out.push_str("{P");
                    out.push_str(&n.to_string());
                    out.push('}');
                }
            },
        }
    }
    out
}
