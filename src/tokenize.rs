//! Deterministic review tokenizer.
//!
//! A token is either a maximal run of word characters (`[A-Za-z0-9]`,
//! apostrophe, underscore, hyphen) or a single non-whitespace character of
//! any other kind. Whitespace separates tokens and is never emitted. Tokens
//! keep their original casing; consumers lowercase them with [`normalize`].

/// Lazy token stream over a borrowed string.
///
/// Cloning forks the scan at its current position. Calling [`tokens`] again
/// rescans from the start and yields the same sequence.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let base = self.pos;
        let mut word_start: Option<usize> = None;

        for (offset, c) in self.text[base..].char_indices() {
            let at = base + offset;
            if is_word_char(c) {
                word_start.get_or_insert(at);
                continue;
            }
            if let Some(start) = word_start {
                // Leave the delimiter in place; it is handled on the next call.
                self.pos = at;
                return Some(&self.text[start..at]);
            }
            let end = at + c.len_utf8();
            self.pos = end;
            if !c.is_whitespace() {
                return Some(&self.text[at..end]);
            }
        }

        self.pos = self.text.len();
        word_start.map(|start| &self.text[start..])
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}

/// Start a lazy token scan over `text`.
pub fn tokens(text: &str) -> Tokens<'_> {
    Tokens { text, pos: 0 }
}

/// Tokenize `text` into owned tokens, preserving input order and casing.
pub fn tokenize(text: &str) -> Vec<String> {
    tokens(text).map(str::to_owned).collect()
}

/// Lowercase form used as the key in frequency tables.
pub fn normalize(token: &str) -> String {
    token.to_lowercase()
}

/// Whether a (lowercased) token is one of the 32 ASCII punctuation characters.
pub fn is_ascii_punctuation_token(token: &str) -> bool {
    matches!(token.as_bytes(), [b] if b.is_ascii_punctuation())
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '\'' | '_' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contraction_hyphenation_and_bang() {
        assert_eq!(tokenize("don't stop-now!"), vec!["don't", "stop-now", "!"]);
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert!(tokenize("  ").is_empty());
        assert!(tokenize("").is_empty());
        assert!(tokenize("\t\n \r\n").is_empty());
    }

    #[test]
    fn consecutive_punctuation_is_split() {
        assert_eq!(tokenize("wow!!?"), vec!["wow", "!", "!", "?"]);
        assert_eq!(tokenize("...").len(), 3);
    }

    #[test]
    fn casing_is_preserved() {
        assert_eq!(tokenize("GREAT Movie"), vec!["GREAT", "Movie"]);
        assert_eq!(normalize("GREAT"), "great");
    }

    #[test]
    fn underscores_and_digits_join_words() {
        assert_eq!(tokenize("top_10 of 2009,"), vec!["top_10", "of", "2009", ","]);
    }

    #[test]
    fn non_ascii_letters_are_single_tokens() {
        assert_eq!(tokenize("café"), vec!["caf", "é"]);
    }

    #[test]
    fn trailing_word_is_flushed() {
        assert_eq!(tokenize("(really) fine"), vec!["(", "really", ")", "fine"]);
    }

    #[test]
    fn rescanning_is_deterministic() {
        let text = "It's a 10/10 -- \"must-see\" film!!";
        assert_eq!(tokenize(text), tokenize(text));
        let lazy: Vec<&str> = tokens(text).collect();
        assert_eq!(lazy, tokenize(text));
    }

    #[test]
    fn cloned_iterator_forks_at_position() {
        let mut it = tokens("one two three");
        assert_eq!(it.next(), Some("one"));
        let fork = it.clone();
        assert_eq!(it.collect::<Vec<_>>(), fork.collect::<Vec<_>>());
    }

    #[test]
    fn punctuation_membership() {
        assert!(is_ascii_punctuation_token("!"));
        assert!(is_ascii_punctuation_token("-"));
        assert!(is_ascii_punctuation_token("'"));
        assert!(!is_ascii_punctuation_token("--"));
        assert!(!is_ascii_punctuation_token("a"));
        assert!(!is_ascii_punctuation_token("é"));
        assert!(!is_ascii_punctuation_token(""));
    }
}
