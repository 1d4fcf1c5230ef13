//! Word-boundary splitting of oversized elements.

/// Character count, the unit chunk sizes are measured in.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Split `text` into pieces of at most `limit` characters.
///
/// Pieces break after whitespace so words stay whole; a single word longer
/// than `limit` is cut at character boundaries. Concatenating the pieces
/// reproduces `text` exactly. `limit` must be positive.
pub(crate) fn split_words(text: &str, limit: usize) -> Vec<&str> {
    debug_assert!(limit > 0);

    let mut pieces = Vec::new();
    // Current piece as a byte range into `text`
    let mut start = 0;
    let mut end = 0;
    let mut len = 0;

    for segment in text.split_inclusive(char::is_whitespace) {
        let seg_len = char_len(segment);

        if len + seg_len <= limit {
            end += segment.len();
            len += seg_len;
            continue;
        }

        if len > 0 {
            pieces.push(&text[start..end]);
        }
        start = end;

        if seg_len <= limit {
            end += segment.len();
            len = seg_len;
            continue;
        }

        // Hard-split an oversized word, keeping the tail open
        let mut count = 0;
        for (offset, _) in segment.char_indices() {
            if count == limit {
                pieces.push(&text[start..end + offset]);
                start = end + offset;
                count = 0;
            }
            count += 1;
        }
        end += segment.len();
        len = count;
    }

    if end > start {
        pieces.push(&text[start..end]);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str, limit: usize) -> Vec<&str> {
        let pieces = split_words(text, limit);
        assert_eq!(pieces.concat(), text);
        for piece in &pieces {
            assert!(!piece.is_empty());
            assert!(char_len(piece) <= limit, "{:?} exceeds {}", piece, limit);
        }
        pieces
    }

    #[test]
    fn test_split_at_words() {
        let pieces = check("alpha beta gamma delta", 11);
        assert_eq!(pieces, vec!["alpha beta ", "gamma delta"]);
    }

    #[test]
    fn test_split_long_word() {
        let pieces = check("bbbbbbbbbbbbbbb", 10);
        assert_eq!(pieces, vec!["bbbbbbbbbb", "bbbbb"]);
    }

    #[test]
    fn test_split_mixed() {
        check("tiny enormouslylongword x  y", 5);
        check("a\nb\tc   d", 2);
        check("x", 1);
    }

    #[test]
    fn test_split_multibyte() {
        let pieces = check("한국어텍스트 데이터", 4);
        assert_eq!(pieces[0], "한국어텍");
    }
}
