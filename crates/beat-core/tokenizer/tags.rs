//! Generic tag grammars shared by several bracket tags
//!
//! - Key/value payloads (`[EVENT: name="Gala" prestige=7]`) used by EVENT,
//!   RESULT, OVERRIDE and MAIL.
//! - Compact stat notation (`[STAT_CHANGE: coins-150 reputation+1]`).
//!
//! Both grammars are lax: malformed pairs are dropped, never reported.

use crate::parser::ast::{StatDeltas, TagMap, TagValue};
use core::{iter::Peekable, str::CharIndices};

/// Parse `key=value` pairs from a tag body
///
/// Values are `"quoted"` / `“curly quoted”` strings or bare tokens. Bare tokens
/// that look numeric become numbers; quoted values always stay text. Tokens
/// without `=` and pairs with an unterminated quote are dropped.
///
/// # Example
///
/// ```rust
/// use beat_core::tokenizer::parse_key_values;
/// use beat_core::parser::ast::TagValue;
///
/// let map = parse_key_values(r#"name="Gala" prestige=7 cost=150coins"#);
/// assert_eq!(map.get("name"), Some(&TagValue::Text("Gala".into())));
/// assert_eq!(map.get("prestige"), Some(&TagValue::Integer(7)));
/// assert_eq!(map.get("cost"), Some(&TagValue::Text("150coins".into())));
/// ```
#[must_use]
pub fn parse_key_values(body: &str) -> TagMap {
    let mut map = TagMap::new();
    let mut chars = body.char_indices().peekable();

    loop {
        skip_whitespace(&mut chars);
        let Some(&(key_start, _)) = chars.peek() else {
            break;
        };

        let key_end = consume_while(&mut chars, body.len(), is_key_char);
        let key = &body[key_start..key_end];

        if key.is_empty() || !matches!(chars.peek(), Some((_, '='))) {
            // Not a pair; drop the rest of this token
            consume_while(&mut chars, body.len(), |c| !c.is_whitespace());
            continue;
        }
        chars.next();

        match chars.peek().copied() {
            Some((quote_pos, quote)) if is_open_quote(quote) => {
                chars.next();
                let value_start = quote_pos + quote.len_utf8();
                let value_end = consume_while(&mut chars, body.len(), |c| !is_close_quote(c));
                if chars.next().is_none() {
                    // Unterminated quote swallows the rest of the body
                    break;
                }
                map.insert(
                    key.to_string(),
                    TagValue::Text(body[value_start..value_end].to_string()),
                );
            }
            Some((value_start, _)) => {
                let value_end = consume_while(&mut chars, body.len(), |c| !c.is_whitespace());
                map.insert(
                    key.to_string(),
                    TagValue::coerce(&body[value_start..value_end]),
                );
            }
            None => {}
        }
    }

    map
}

/// Parse compact stat deltas such as `coins-150 reputation+1`
///
/// Each whitespace- or comma-separated token must end in `+<digits>` or
/// `-<digits>` with a non-empty key before the sign. Repeated keys accumulate.
///
/// # Example
///
/// ```rust
/// use beat_core::tokenizer::parse_stat_changes;
///
/// let deltas = parse_stat_changes("coins-150 reputation+1 stress+?");
/// assert_eq!(deltas.get("coins"), Some(&-150));
/// assert_eq!(deltas.get("reputation"), Some(&1));
/// assert_eq!(deltas.len(), 2);
/// ```
#[must_use]
pub fn parse_stat_changes(body: &str) -> StatDeltas {
    let mut deltas = StatDeltas::new();

    for token in body
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
    {
        if let Some((key, delta)) = parse_stat_token(token) {
            let total = deltas.entry(key.to_string()).or_insert(0);
            // Overflowing tokens are dropped like malformed ones
            if let Some(sum) = total.checked_add(delta) {
                *total = sum;
            }
        }
    }

    deltas
}

/// Split one `<key><sign><digits>` token
fn parse_stat_token(token: &str) -> Option<(&str, i64)> {
    let sign_pos = token.rfind(['+', '-'])?;
    let (key, signed) = token.split_at(sign_pos);
    let digits = &signed[1..];

    if key.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude: i64 = digits.parse().ok()?;
    let delta = if signed.starts_with('-') {
        -magnitude
    } else {
        magnitude
    };
    Some((key, delta))
}

/// Parse a signed number such as `+5`, `-3` or `12`
#[must_use]
pub fn parse_signed_integer(text: &str) -> Option<i64> {
    let text = text.trim();
    text.strip_prefix('+').unwrap_or(text).parse().ok()
}

/// Strip one pair of surrounding straight or curly quotes
#[must_use]
pub fn strip_quotes(text: &str) -> &str {
    let text = text.trim();
    let without_open = text
        .strip_prefix(['"', '\u{201C}', '\''])
        .unwrap_or(text);
    without_open
        .strip_suffix(['"', '\u{201D}', '\''])
        .unwrap_or(without_open)
        .trim()
}

/// Characters allowed in a key
fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Opening quote characters
const fn is_open_quote(c: char) -> bool {
    matches!(c, '"' | '\u{201C}')
}

/// Closing quote characters
const fn is_close_quote(c: char) -> bool {
    matches!(c, '"' | '\u{201D}')
}

/// Skip whitespace characters
fn skip_whitespace(chars: &mut Peekable<CharIndices<'_>>) {
    while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
}

/// Consume characters while `predicate` holds, returning the end byte offset
fn consume_while(
    chars: &mut Peekable<CharIndices<'_>>,
    end_of_input: usize,
    predicate: impl Fn(char) -> bool,
) -> usize {
    while chars.next_if(|&(_, c)| predicate(c)).is_some() {}
    chars.peek().map_or(end_of_input, |&(pos, _)| pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_payload() {
        let map = parse_key_values(
            r#"name="Gala" prestige=7 cost=150 strictness=5 deadline="medium" dress_code="black tie""#,
        );
        assert_eq!(map.len(), 6);
        assert_eq!(map["name"], TagValue::Text("Gala".to_string()));
        assert_eq!(map["prestige"], TagValue::Integer(7));
        assert_eq!(map["cost"], TagValue::Integer(150));
        assert_eq!(map["dress_code"], TagValue::Text("black tie".to_string()));
    }

    #[test]
    fn curly_quotes_and_floats() {
        let map = parse_key_values("from=\u{201C}Maison Rose\u{201D} score=8.5");
        assert_eq!(map["from"], TagValue::Text("Maison Rose".to_string()));
        assert_eq!(map["score"], TagValue::Float(8.5));
    }

    #[test]
    fn quoted_numbers_stay_text() {
        let map = parse_key_values(r#"tier="7""#);
        assert_eq!(map["tier"], TagValue::Text("7".to_string()));
    }

    #[test]
    fn malformed_pairs_are_dropped() {
        let map = parse_key_values(r#"loose token =5 type=invite name="unterminated"#);
        assert_eq!(map.len(), 1);
        assert_eq!(map["type"], TagValue::Text("invite".to_string()));
    }

    #[test]
    fn empty_body_gives_empty_map() {
        assert!(parse_key_values("   ").is_empty());
        assert!(parse_key_values("").is_empty());
    }

    #[test]
    fn stat_changes_compact_notation() {
        let deltas = parse_stat_changes("coins-150 reputation+1");
        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas["coins"], -150);
        assert_eq!(deltas["reputation"], 1);
    }

    #[test]
    fn stat_changes_accumulate_and_skip_garbage() {
        let deltas = parse_stat_changes("coins-10, coins+4 stress+ +5 mood");
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas["coins"], -6);
    }

    #[test]
    fn overflowing_stat_token_is_dropped() {
        let deltas = parse_stat_changes("coins+9223372036854775807 coins+1 stress-2");
        assert_eq!(deltas["coins"], i64::MAX);
        assert_eq!(deltas["stress"], -2);
    }

    #[test]
    fn stat_keys_may_contain_dashes() {
        let deltas = parse_stat_changes("follower-count+20");
        assert_eq!(deltas["follower-count"], 20);
    }

    #[test]
    fn signed_integers() {
        assert_eq!(parse_signed_integer("+5"), Some(5));
        assert_eq!(parse_signed_integer(" -3 "), Some(-3));
        assert_eq!(parse_signed_integer("lots"), None);
    }

    #[test]
    fn quotes_stripped() {
        assert_eq!(strip_quotes("\"Parisian rooftop\""), "Parisian rooftop");
        assert_eq!(strip_quotes("\u{201C}Gala\u{201D}"), "Gala");
        assert_eq!(strip_quotes("plain"), "plain");
    }
}
