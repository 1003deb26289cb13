//! 単語単位検索フィルタ

use super::matcher::StringMatcher;
use super::types::{MatchResult, SearchDirection};
use crate::text::TextView;

/// 識別子を構成する文字か（Unicode英数字、`_`、`$`）
pub fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// マッチ範囲が単語境界に収まっているか
///
/// 2文字前がバックスラッシュの場合も開始境界とみなす（エスケープ文字の直後）
pub fn is_whole_word(text: &TextView<'_>, start: usize, end: usize) -> bool {
    let is_ident_at = |idx: usize| text.char_at(idx).map(is_identifier_char).unwrap_or(false);

    let is_word_start = start == 0
        || !is_ident_at(start - 1)
        || (start > 1 && text.char_at(start - 2) == Some('\\'));

    let is_word_end =
        end == text.len() || !is_ident_at(end) || (end > 0 && !is_ident_at(end - 1));

    is_word_start && is_word_end
}

/// 単語境界を満たすマッチが見つかるまで走査を繰り返す
///
/// 却下時は前方なら `start + 1`、後方なら `end - 1` から再走査するため必ず終了する
pub fn find_whole_word<M: StringMatcher + ?Sized>(
    matcher: &M,
    text: &TextView<'_>,
    offset: usize,
    direction: SearchDirection,
) -> MatchResult {
    let mut offset = offset;
    loop {
        let result = matcher.find_at(text, offset, direction);
        let MatchResult::Found { start, end } = result else {
            return result;
        };
        if is_whole_word(text, start, end) {
            return result;
        }

        log::trace!("rejected non-word match {}..{}", start, end);
        offset = match direction {
            SearchDirection::Forward => start + 1,
            SearchDirection::Backward => match end.checked_sub(1) {
                Some(next) => next,
                None => return MatchResult::NotFound,
            },
        };
        if direction.is_forward() && offset > text.len() {
            return MatchResult::NotFound;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::matcher::LiteralMatcher;
    use crate::search::regex::RegexMatcher;

    #[test]
    fn skips_embedded_occurrences_forward() {
        let text = TextView::new("catcatalog cat");
        let matcher = LiteralMatcher::new("cat", true);
        assert_eq!(
            find_whole_word(&matcher, &text, 0, SearchDirection::Forward),
            MatchResult::found(11, 14)
        );
    }

    #[test]
    fn skips_embedded_occurrences_backward() {
        let text = TextView::new("cat concat");
        let matcher = LiteralMatcher::new("cat", true);
        assert_eq!(
            find_whole_word(&matcher, &text, 10, SearchDirection::Backward),
            MatchResult::found(0, 3)
        );
    }

    #[test]
    fn no_whole_word_match() {
        let text = TextView::new("category");
        let matcher = LiteralMatcher::new("cat", true);
        assert_eq!(
            find_whole_word(&matcher, &text, 0, SearchDirection::Forward),
            MatchResult::NotFound
        );
        assert_eq!(
            find_whole_word(&matcher, &text, 8, SearchDirection::Backward),
            MatchResult::NotFound
        );
    }

    #[test]
    fn escaped_character_counts_as_boundary() {
        // `\ncat` の n は識別子文字だが、その前がバックスラッシュ
        let escaped = TextView::new("x\\ncat");
        assert!(is_whole_word(&escaped, 3, 6));
        let plain = TextView::new("xyncat");
        assert!(!is_whole_word(&plain, 3, 6));
    }

    #[test]
    fn pattern_ending_in_punctuation_is_word_end() {
        let text = TextView::new("call(x)");
        assert!(is_whole_word(&text, 0, 5));
    }

    #[test]
    fn identifier_chars_are_unicode_aware() {
        assert!(is_identifier_char('é'));
        assert!(is_identifier_char('漢'));
        assert!(is_identifier_char('$'));
        assert!(!is_identifier_char('-'));
        let text = TextView::new("café cafébar");
        assert!(is_whole_word(&text, 0, 4));
        assert!(!is_whole_word(&text, 5, 9));
    }

    #[test]
    fn empty_regex_match_terminates_backward() {
        let text = TextView::new("ab");
        let matcher = RegexMatcher::new("b*", true).unwrap();
        // 先頭の空マッチが却下されるとそれ以上戻れない
        let result = find_whole_word(&matcher, &text, 2, SearchDirection::Backward);
        assert_eq!(result, MatchResult::NotFound);
    }
}
