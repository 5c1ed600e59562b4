use once_cell::sync::Lazy;
use regex::Regex;

/// Comments first, then any `<` that is not followed by whitespace opens a tag
/// running to the next `>` outside a quoted attribute value (or to the end of the
/// value when unterminated).
static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)<!--.*?(?:-->|\z)",
        r#"|<(?:(?:"[^"]*(?:"|\z)|'[^']*(?:'|\z)|[^\s>"'])"#,
        r#"(?:"[^"]*(?:"|\z)|'[^']*(?:'|\z)|[^"'>])*)?(?:>|\z)"#,
    ))
    .expect("markup pattern is valid")
});

/// Removes markup tags and NUL bytes. A `<` followed by whitespace (`a < b`) is kept as text.
pub fn strip_tags(raw: &str) -> String {
    let without_nul = raw.replace('\0', "");
    MARKUP.replace_all(&without_nul, "").into_owned()
}

/// Normalizes one submitted value: markup stripped, surrounding whitespace trimmed.
pub fn clean_field(raw: &str) -> String {
    strip_tags(raw).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains_markup(s: &str) -> bool {
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '<' {
                match chars.peek() {
                    Some(next) if next.is_whitespace() => {}
                    _ => return true,
                }
            }
        }
        false
    }

    #[test]
    fn test_strips_script_tags() {
        assert_eq!(strip_tags("<script>x</script>"), "x");
        assert_eq!(clean_field("  <b>Lagos</b>  "), "Lagos");
    }

    #[test]
    fn test_strips_comments_and_unterminated_tags() {
        assert_eq!(strip_tags("Abuja<!-- hidden -->"), "Abuja");
        assert_eq!(strip_tags("Abuja<!-- never closed"), "Abuja");
        assert_eq!(strip_tags("Abuja <img src=x onerror=alert(1)"), "Abuja ");
        assert_eq!(strip_tags("a<>b"), "ab");
    }

    #[test]
    fn test_quoted_attribute_does_not_end_tag() {
        assert_eq!(clean_field("<a title=\">\">Lagos</a>"), "Lagos");
        assert_eq!(clean_field("<p title='x>y'>Abuja</p>"), "Abuja");
        assert_eq!(clean_field("<b class=\"it's\">Kano</b>"), "Kano");
        assert_eq!(clean_field("Enugu<a title=\"never closed>"), "Enugu");
    }

    #[test]
    fn test_keeps_comparison_text() {
        assert_eq!(strip_tags("budget < 500 > 100"), "budget < 500 > 100");
    }

    #[test]
    fn test_removes_nul_bytes() {
        assert_eq!(clean_field("08\u{0}000"), "08000");
    }

    #[test]
    fn test_nested_tags_leave_no_markup() {
        let inputs = [
            "<<b>script>alert(1)<</b>/script>",
            "<scr<b>ipt>x",
            "<a title=\">\">click</a>",
            "<\nscript>",
            "x <",
        ];

        for input in inputs {
            let cleaned = clean_field(input);
            assert!(!contains_markup(&cleaned), "{:?} -> {:?}", input, cleaned);
        }
    }
}
