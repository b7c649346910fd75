use std::iter::Peekable;
use std::str::Chars;

/// One element of a parsed array literal, before element decoding.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ArrayElement {
    Null,
    Value(String),
    Nested(Vec<ArrayElement>),
}

/// Append `text` as an array element, quoting it when the server would.
pub(crate) fn push_element(out: &mut String, text: &str) {
    let needs_quotes = text.is_empty()
        || text.eq_ignore_ascii_case("NULL")
        || text
            .chars()
            .any(|c| matches!(c, '{' | '}' | ',' | '"' | '\\') || c.is_ascii_whitespace());
    if !needs_quotes {
        out.push_str(text);
        return;
    }
    out.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

/// Split an array literal such as `{1,NULL,"a,b"}` into its elements.
///
/// Nested braces become [`ArrayElement::Nested`]; an optional dimension
/// decoration (`[0:2]=`) is skipped.
pub(crate) fn parse_array(s: &str, delimiter: char) -> Result<Vec<ArrayElement>, String> {
    let mut body = s.trim();
    if body.starts_with('[') {
        let (_, rest) = body
            .split_once('=')
            .ok_or_else(|| "malformed array dimensions".to_string())?;
        body = rest.trim_start();
    }

    let mut chars = body.chars().peekable();
    if chars.next() != Some('{') {
        return Err("array literal must start with \"{\"".to_string());
    }
    let items = parse_level(&mut chars, delimiter)?;
    skip_whitespace(&mut chars);
    if let Some(c) = chars.next() {
        return Err(format!("junk after closing brace: {c:?}"));
    }
    Ok(items)
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(char::is_ascii_whitespace).is_some() {}
}

fn parse_level(chars: &mut Peekable<Chars<'_>>, delimiter: char) -> Result<Vec<ArrayElement>, String> {
    let mut items = Vec::new();
    skip_whitespace(chars);
    if chars.next_if_eq(&'}').is_some() {
        return Ok(items);
    }

    loop {
        skip_whitespace(chars);
        let item = match chars.peek() {
            Some('{') => {
                chars.next();
                ArrayElement::Nested(parse_level(chars, delimiter)?)
            }
            Some('"') => {
                chars.next();
                ArrayElement::Value(parse_quoted(chars)?)
            }
            Some(_) => parse_unquoted(chars, delimiter)?,
            None => return Err("unexpected end of array".to_string()),
        };
        items.push(item);

        skip_whitespace(chars);
        match chars.next() {
            Some('}') => return Ok(items),
            Some(c) if c == delimiter => {}
            Some(c) => return Err(format!("unexpected {c:?} after array element")),
            None => return Err("unexpected end of array".to_string()),
        }
    }
}

fn parse_quoted(chars: &mut Peekable<Chars<'_>>) -> Result<String, String> {
    let mut value = String::new();
    loop {
        match chars.next() {
            Some('"') => return Ok(value),
            Some('\\') => match chars.next() {
                Some(c) => value.push(c),
                None => break,
            },
            Some(c) => value.push(c),
            None => break,
        }
    }
    Err("unterminated quoted array element".to_string())
}

fn parse_unquoted(chars: &mut Peekable<Chars<'_>>, delimiter: char) -> Result<ArrayElement, String> {
    let mut value = String::new();
    let mut escaped = false;
    // length of `value` up to the last escaped or non-space char
    let mut keep = 0;
    while let Some(&c) = chars.peek() {
        if c == delimiter || c == '}' {
            break;
        }
        if matches!(c, '{' | '"') {
            return Err(format!("unexpected {c:?} inside unquoted array element"));
        }
        chars.next();
        if c == '\\' {
            let next = chars
                .next()
                .ok_or_else(|| "unexpected end of array".to_string())?;
            value.push(next);
            escaped = true;
            keep = value.len();
        } else {
            value.push(c);
            if !c.is_ascii_whitespace() {
                keep = value.len();
            }
        }
    }
    value.truncate(keep);
    if value.is_empty() && !escaped {
        return Err("empty unquoted array element".to_string());
    }
    if !escaped && value.eq_ignore_ascii_case("NULL") {
        return Ok(ArrayElement::Null);
    }
    Ok(ArrayElement::Value(value))
}
