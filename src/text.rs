/// Re-flow `text` into lines of roughly `max_length` characters, breaking only
/// between words. Runs of whitespace collapse to a single space.
///
/// A line is broken before a word once the characters already on it plus the
/// word exceed `max_length`; the joining space is not counted, so a line can
/// run slightly over. A break that would fall right after a trailing `-`
/// is dropped and the two parts are joined, keeping hyphenated words whole.
/// A word longer than `max_length` gets a line of its own.
pub fn add_line_breaks(text: &str, max_length: usize) -> String {
    let mut output = String::with_capacity(text.len());
    let mut line_length = 0;

    for word in text.split_whitespace() {
        let word_length = word.chars().count();
        if line_length > 0 && line_length + word_length > max_length {
            if !output.ends_with('-') {
                output.push('\n');
            }
            line_length = 0;
        }
        if line_length > 0 {
            output.push(' ');
            line_length += 1;
        }
        output.push_str(word);
        line_length += word_length;
    }

    if output.is_empty() {
        text.to_string()
    } else {
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(add_line_breaks("short answer", 80), "short answer");
    }

    #[test]
    fn test_breaks_between_words() {
        let wrapped = add_line_breaks("one two three four five", 9);
        assert_eq!(wrapped, "one two\nthree four\nfive");
    }

    #[test]
    fn test_hyphenated_word_stays_on_one_line() {
        assert_eq!(add_line_breaks("a well- known fact", 8), "a well-known\nfact");
    }

    #[test]
    fn test_long_word_is_not_split() {
        assert_eq!(add_line_breaks("a Donaudampfschiff b", 5), "a\nDonaudampfschiff\nb");
    }

    #[test]
    fn test_blank_text_is_returned_as_is() {
        assert_eq!(add_line_breaks("   ", 10), "   ");
    }
}
