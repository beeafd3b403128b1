/// Characters that separate the words of a statement.
pub const WHITESPACE: &str = " \t\n";

/// Splits `text` on any character in `delimiters`, dropping empty fields.
pub fn tokenize(text: &str, delimiters: &str) -> Vec<String> {
    text.split(|ch| delimiters.contains(ch))
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns what follows the first `count` tokens of `text`, untouched.
///
/// Leading delimiters of the remainder are kept, so the result can be
/// tokenized again and yields exactly the tokens after the skipped ones.
pub fn skip_tokens<'a>(text: &'a str, delimiters: &str, count: usize) -> &'a str {
    let is_delim = |ch: char| delimiters.contains(ch);
    let mut rest = text;
    for _ in 0..count {
        rest = rest.trim_start_matches(is_delim);
        rest = match rest.find(is_delim) {
            Some(end) => &rest[end..],
            None => "",
        };
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_whitespace() {
        assert_eq!(
            tokenize("  /bin/ls\t-l   /tmp\n", WHITESPACE),
            vec!["/bin/ls", "-l", "/tmp"]
        );
    }

    #[test]
    fn test_tokenize_discards_empty_fields() {
        assert_eq!(tokenize("pwd;;  ; cd /", ";"), vec!["pwd", "  ", " cd /"]);
        assert!(tokenize("", WHITESPACE).is_empty());
        assert!(tokenize(" \t \n", WHITESPACE).is_empty());
    }

    #[test]
    fn test_tokenize_keeps_operators_inside_words() {
        assert_eq!(tokenize("ls>out", WHITESPACE), vec!["ls>out"]);
    }

    #[test]
    fn test_skip_tokens() {
        let text = "loop 3  /bin/echo a > f";
        let rest = skip_tokens(text, WHITESPACE, 2);
        assert_eq!(rest, "  /bin/echo a > f");
        assert_eq!(tokenize(rest, WHITESPACE), vec!["/bin/echo", "a", ">", "f"]);
    }

    #[test]
    fn test_skip_tokens_past_end() {
        assert_eq!(skip_tokens("loop 3", WHITESPACE, 2), "");
        assert_eq!(skip_tokens("loop", WHITESPACE, 2), "");
    }
}
