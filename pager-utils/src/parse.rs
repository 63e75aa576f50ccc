/// Parse a whole message as a signed integer, ignoring surrounding whitespace.
pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Parse an optional command argument naming one of `choices` (case-insensitive).
///
/// Missing arguments resolve to `default`; unknown ones to `None`.
pub fn parse_choice<'a>(raw: Option<&str>, choices: &[&'a str], default: &'a str) -> Option<&'a str> {
    match raw {
        Some(value) => choices
            .iter()
            .copied()
            .find(|choice| choice.eq_ignore_ascii_case(value.trim())),
        None => Some(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_tolerate_whitespace() {
        assert_eq!(parse_integer(" 42\n"), Some(42));
        assert_eq!(parse_integer("-1"), Some(-1));
        assert_eq!(parse_integer("4 2"), None);
        assert_eq!(parse_integer("page 4"), None);
        assert_eq!(parse_integer(""), None);
    }

    #[test]
    fn choices_are_case_insensitive() {
        let choices = ["fields", "text", "embeds"];
        assert_eq!(parse_choice(Some("TEXT"), &choices, "fields"), Some("text"));
        assert_eq!(parse_choice(None, &choices, "fields"), Some("fields"));
        assert_eq!(parse_choice(Some("nope"), &choices, "fields"), None);
    }
}
