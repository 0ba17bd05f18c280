//! Substring heuristics for scraping raw markup

/// Returns the substring between the first occurrence of `start` and the
/// next occurrence of `end` after it, or the empty string when either
/// pattern is missing.
///
/// This is the workhorse behind the href quote-scan on listing rows and the
/// parenthesis-scan on the GPS row.
pub fn string_between<'a>(s: &'a str, start: &str, end: &str) -> &'a str {
    let Some(from) = s.find(start) else {
        return "";
    };
    let from = from + start.len();
    match s[from..].find(end) {
        Some(len) => &s[from..from + len],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_extraction() {
        assert_eq!(string_between("a(b)c", "(", ")"), "b");
    }

    #[test]
    fn test_first_pair_wins() {
        assert_eq!(string_between("(one) (two)", "(", ")"), "one");
    }

    #[test]
    fn test_missing_start() {
        assert_eq!(string_between("no parens here", "(", ")"), "");
    }

    #[test]
    fn test_missing_end() {
        assert_eq!(string_between("open ( but never closed", "(", ")"), "");
    }

    #[test]
    fn test_quoted_href() {
        let markup = r#"<a href="casa-batllo/" class="bldg">Casa Batlló</a>"#;
        assert_eq!(string_between(markup, "\"", "\""), "casa-batllo/");
    }

    #[test]
    fn test_empty_match() {
        assert_eq!(string_between(r#"href="""#, "\"", "\""), "");
    }

    #[test]
    fn test_multichar_patterns() {
        assert_eq!(string_between("<td>GPS</td>", "<td>", "</td>"), "GPS");
    }

    #[test]
    fn test_gps_coordinates() {
        let markup = "<td>GPS</td><td>location (41.40338, 2.17403) approx</td>";
        assert_eq!(string_between(markup, "(", ")"), "41.40338, 2.17403");
    }
}
