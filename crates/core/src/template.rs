//! Tooltip template rendering.
//!
//! Templates use `{field}` placeholders substituted from the reading's
//! fields, e.g. `SNR: {SNR} / Q: {Q}%`. Literal braces are written
//! `{{` and `}}`. Rendering is pure; a placeholder naming a field the
//! reading does not carry is an error, because a typo'd template is a
//! configuration problem and must surface rather than render blank.

use std::collections::BTreeMap;

use crate::error::FormatError;

/// Substitute `{field}` placeholders from `fields`.
pub fn render(template: &str, fields: &BTreeMap<String, String>) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => return Err(FormatError::UnterminatedPlaceholder),
                    }
                }
                let value = fields
                    .get(&name)
                    .ok_or(FormatError::UnknownField { name })?;
                out.push_str(value);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(FormatError::UnmatchedBrace),
            c => out.push(c),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_fields() {
        let f = fields(&[("SNR", "5"), ("Q", "15")]);
        assert_eq!(render("SNR: {SNR} / Q: {Q}%", &f).unwrap(), "SNR: 5 / Q: 15%");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(render("no placeholders", &fields(&[])).unwrap(), "no placeholders");
    }

    #[test]
    fn doubled_braces_are_literals() {
        let f = fields(&[("Q", "15")]);
        assert_eq!(render("{{Q}} = {Q}", &f).unwrap(), "{Q} = 15");
    }

    #[test]
    fn unknown_field_is_an_error() {
        assert_matches!(
            render("Q: {Q}", &fields(&[("SNR", "5")])),
            Err(FormatError::UnknownField { name }) if name == "Q"
        );
    }

    #[test]
    fn unterminated_placeholder_is_an_error() {
        assert_matches!(
            render("Q: {Q", &fields(&[("Q", "15")])),
            Err(FormatError::UnterminatedPlaceholder)
        );
    }

    #[test]
    fn stray_closing_brace_is_an_error() {
        assert_matches!(render("oops }", &fields(&[])), Err(FormatError::UnmatchedBrace));
    }
}
