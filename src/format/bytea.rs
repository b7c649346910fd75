// https://www.postgresql.org/docs/current/datatype-binary.html

pub(crate) fn format_bytea(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("\\x");
    out.push_str(&hex::encode(bytes));
    out
}

/// Accepts both output formats: `\x...` hex and the legacy escape format.
pub(crate) fn parse_bytea(s: &str) -> Result<Vec<u8>, String> {
    if let Some(digits) = s.strip_prefix("\\x") {
        return hex::decode(digits).map_err(|e| format!("invalid hex bytea: {e}"));
    }
    parse_escaped(s.as_bytes())
}

fn parse_escaped(input: &[u8]) -> Result<Vec<u8>, String> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if input[i] != b'\\' {
            out.push(input[i]);
            i += 1;
            continue;
        }
        match input.get(i + 1..i + 4) {
            _ if input.get(i + 1) == Some(&b'\\') => {
                out.push(b'\\');
                i += 2;
            }
            Some(&[a, b, c])
                if (b'0'..=b'3').contains(&a)
                    && (b'0'..=b'7').contains(&b)
                    && (b'0'..=b'7').contains(&c) =>
            {
                out.push(((a - b'0') << 6) | ((b - b'0') << 3) | (c - b'0'));
                i += 4;
            }
            _ => return Err(format!("invalid escape sequence at byte {i}")),
        }
    }
    Ok(out)
}
