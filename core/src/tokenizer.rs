use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Word tokens of two or more characters, the usual vectorizer default.
    static ref RE: Regex = Regex::new(r"(?u)\b\w\w+\b").expect("valid regex");
}

/// Tokenize text into lowercased terms. No Unicode normalization is applied.
///
/// No stopword removal or stemming: interrogatives like "what" carry signal
/// when matching questions against questions.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    RE.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("What are your hours?");
        assert_eq!(t, vec!["what", "are", "your", "hours"]);
    }

    #[test]
    fn drops_single_char_tokens() {
        let t = tokenize("We are open 9 to 5. I agree");
        assert_eq!(t, vec!["we", "are", "open", "to", "agree"]);
    }

    #[test]
    fn keeps_compatibility_characters() {
        assert_eq!(tokenize("ﬁle Ｗｉｆｉ"), vec!["ﬁle", "ｗｉｆｉ"]);
        assert!(!tokenize("ﬁle").contains(&"file".to_string()));
    }
}
