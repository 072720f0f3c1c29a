//! Hebrew-aware word counting for the target text.
//!
//! The count feeds both the prompt (so the model works from the same number)
//! and the WPM metric, so it has to be stable across pointed and unpointed
//! renditions of the same passage.

/// Hebrew geresh, kept so abbreviations like גיל ח׳ stay one word.
const GERESH: char = '\u{05F3}';
/// Hebrew gershayim, as in מנכ״ל.
const GERSHAYIM: char = '\u{05F4}';

/// Count words in Hebrew text that may carry points, cantillation and
/// punctuation.
///
/// Every character that is not a letter, a combining mark, whitespace,
/// geresh, gershayim or a hyphen is treated as a separator; the result is the
/// number of remaining whitespace-separated runs. Empty or punctuation-only
/// input counts as zero.
pub fn count_words(text: &str) -> usize {
    let cleaned: String = text
        .chars()
        .map(|c| if keeps_word_together(c) { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().count()
}

fn keeps_word_together(c: char) -> bool {
    c.is_alphabetic()
        || c.is_whitespace()
        || is_combining_mark(c)
        || c == GERESH
        || c == GERSHAYIM
        || c == '-'
}

/// Combining marks that may sit inside a word: Hebrew points and
/// cantillation (U+0591..=U+05C7) plus the general combining blocks.
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0591}'..='\u{05C7}'
        | '\u{0300}'..='\u{036F}'
        | '\u{1AB0}'..='\u{1AFF}'
        | '\u{20D0}'..='\u{20FF}'
        | '\u{FE20}'..='\u{FE2F}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_plain_hebrew() {
        assert_eq!(count_words("שלום עולם"), 2);
    }

    #[test]
    fn pointed_text_counts_like_unpointed() {
        // Same verse with and without niqqud.
        let pointed = "בְּרֵאשִׁית בָּרָא אֱלֹהִים";
        let unpointed = "בראשית ברא אלהים";
        assert_eq!(count_words(pointed), 3);
        assert_eq!(count_words(pointed), count_words(unpointed));
    }

    #[test]
    fn punctuation_does_not_create_words() {
        assert_eq!(count_words("שָׁלוֹם, עוֹלָם!"), 2);
        assert_eq!(count_words("... ?! --"), 0);
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t"), 0);
    }

    #[test]
    fn maqaf_splits_but_gershayim_does_not() {
        // The maqaf (U+05BE) is punctuation, so בית־ספר reads as two words;
        // gershayim inside an abbreviation keeps the word whole.
        assert_eq!(count_words("בית־ספר"), 2);
        assert_eq!(count_words("המנכ״ל אמר"), 2);
    }

    #[test]
    fn digits_are_separators() {
        assert_eq!(count_words("פרק 12 פסוק 3"), 2);
    }
}
