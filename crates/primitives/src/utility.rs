use validator::ValidationError;

const MIN_LEN: usize = 8;
const MAX_LEN: usize = 128;

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();

    if len < MIN_LEN {
        return Err(error("password_too_short"));
    }

    if len > MAX_LEN {
        return Err(error("password_too_long"));
    }

    if password.trim().is_empty() {
        return Err(error("password_blank"));
    }

    Ok(())
}

fn error(code: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code).with_message(
        format!("password must be between {} and {} characters", MIN_LEN, MAX_LEN).into(),
    );
    err.add_param("min_length".into(), &MIN_LEN);
    err.add_param("max_length".into(), &MAX_LEN);
    err
}

/// Escapes `%`, `_` and `\` so user input is matched literally inside a
/// `LIKE`/`ILIKE` pattern.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
