/// Splits text into consecutive chunks of at most `max_words` whitespace-delimited
/// words, each rejoined with single spaces. Empty input yields no chunks.
///
/// A limit of 0 is treated as 1. Sentence boundaries are not respected.
pub fn chunk_words(text: &str, max_words: usize) -> Vec<String> {
    let max_words = max_words.max(1);
    let words: Vec<&str> = text.split_whitespace().collect();
    words.chunks(max_words).map(|group| group.join(" ")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(chunk_words("", 10).is_empty());
        assert!(chunk_words("   \n\t ", 10).is_empty());
    }

    #[test]
    fn test_short_text_is_one_chunk_with_normalised_spacing() {
        assert_eq!(chunk_words("Led  a\nteam of 5", 10), vec!["Led a team of 5"]);
    }

    #[test]
    fn test_splits_at_exact_boundaries() {
        let chunks = chunk_words("a b c d e f g", 3);
        assert_eq!(chunks, vec!["a b c", "d e f", "g"]);
    }

    #[test]
    fn test_word_count_is_conserved_and_bounded() {
        let text = "Designed and shipped a billing service handling 2M requests per day \
                    while mentoring three engineers and cutting p99 latency by 40 percent";
        let total = text.split_whitespace().count();
        for max in 1..=total + 2 {
            let chunks = chunk_words(text, max);
            let counts: Vec<usize> = chunks.iter().map(|c| c.split_whitespace().count()).collect();
            assert_eq!(counts.iter().sum::<usize>(), total, "max={max}");
            assert!(counts.iter().all(|&c| c >= 1 && c <= max), "max={max}");
        }
    }

    #[test]
    fn test_zero_limit_treated_as_one() {
        assert_eq!(chunk_words("x y", 0), vec!["x", "y"]);
    }
}
