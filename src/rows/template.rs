//! Placeholder substitution shared by view templates and command templates
//!
//! Grammar (no nesting, no escaping):
//! - `{}`  → every field of the row joined with `" | "`
//! - `{N}` → the N-th field (0-based) when in range
//! - any other `{...}`, or an out-of-range index, is emitted unchanged
//! - a `{` without a following `}` is emitted literally

/// Separator used when the empty placeholder expands to the whole row
pub const ALL_FIELDS_SEPARATOR: &str = " | ";

/// Substitute every placeholder in `template` against the fields of one row
pub fn substitute<S: AsRef<str>>(template: &str, fields: &[S]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find('}') else {
            // Unmatched brace: the remainder is literal text
            out.push_str(&rest[open..]);
            return out;
        };

        let body = &after_open[..close];
        match expand(body, fields) {
            Some(value) => out.push_str(&value),
            None => {
                out.push('{');
                out.push_str(body);
                out.push('}');
            }
        }

        rest = &after_open[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Expand a placeholder body, or `None` when it must stay literal
fn expand<S: AsRef<str>>(body: &str, fields: &[S]) -> Option<String> {
    if body.is_empty() {
        return Some(
            fields
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(ALL_FIELDS_SEPARATOR),
        );
    }

    if !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let index: usize = body.parse().ok()?;
    fields.get(index).map(|f| f.as_ref().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit() -> Vec<String> {
        vec!["apple".into(), "banana".into(), "cherry".into()]
    }

    #[test]
    fn test_numbered_placeholders() {
        let data = fruit();
        assert_eq!(substitute("{0}", &data), "apple");
        assert_eq!(substitute("{2}", &data), "cherry");
        assert_eq!(substitute("{0} and {1}", &data), "apple and banana");
        assert_eq!(substitute("{0} {0}", &data), "apple apple");
    }

    #[test]
    fn test_all_fields_placeholder() {
        let data = fruit();
        assert_eq!(substitute("{}", &data), "apple | banana | cherry");
        assert_eq!(
            substitute("{} - {0}", &data),
            "apple | banana | cherry - apple"
        );
    }

    #[test]
    fn test_out_of_range_and_non_numeric_stay_literal() {
        let data = fruit();
        assert_eq!(substitute("{99}", &data), "{99}");
        assert_eq!(substitute("{name}", &data), "{name}");
        assert_eq!(substitute("{-1}", &data), "{-1}");
        // Larger than usize: still literal, never a panic
        assert_eq!(
            substitute("{99999999999999999999999}", &data),
            "{99999999999999999999999}"
        );
    }

    #[test]
    fn test_unmatched_brace_is_literal() {
        let data = fruit();
        assert_eq!(substitute("open { brace", &data), "open { brace");
        assert_eq!(substitute("{0} then {", &data), "apple then {");
    }

    #[test]
    fn test_no_nesting() {
        let data = fruit();
        // The body runs to the first closing brace
        assert_eq!(substitute("{a{0}}", &data), "{a{0}}");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(substitute("hello world", &fruit()), "hello world");
        assert_eq!(substitute("", &fruit()), "");
    }

    #[test]
    fn test_empty_row() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(substitute("{}", &empty), "");
        assert_eq!(substitute("{0}", &empty), "{0}");
    }
}
