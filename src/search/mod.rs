//! 検索モジュール
//!
//! リテラル／正規表現検索、単語単位フィルタ、置換文字列の生成を提供

mod matcher;
mod regex;
mod replace;
pub mod types;
mod word;

use crate::error::Result;
use crate::text::TextView;

pub use matcher::{LiteralMatcher, StringMatcher};
pub use self::regex::{unescape_template, FullMatcher, RegexMatcher, ReplacementTemplate};
pub use replace::{compute_replacement, replace_all, replace_with_case_respect, ReplaceSummary};
pub use types::{MatchResult, SearchDirection, SearchModel};
pub use word::{find_whole_word, is_identifier_char, is_whole_word};

/// `offset` から検索モデルに従って次（または前）のマッチを探す
///
/// 正規表現のコンパイルに失敗した場合は `FindError::Pattern`
pub fn find(text: &str, offset: usize, model: &SearchModel) -> Result<MatchResult> {
    find_in_view(&TextView::new(text), offset, model)
}

/// 構築済みビューに対する `find`
pub fn find_in_view(text: &TextView<'_>, offset: usize, model: &SearchModel) -> Result<MatchResult> {
    log::debug!("offset={}", offset);
    log::debug!("textlength={}", text.len());
    log::debug!("{}", model);

    let Some(matcher) = build_matcher(model)? else {
        return Ok(MatchResult::NotFound);
    };
    Ok(find_with(matcher.as_ref(), text, offset, model))
}

/// テキスト全体のマッチをすべて列挙する（ハイライト範囲の構築用）
pub fn find_all(text: &str, model: &SearchModel) -> Result<Vec<MatchResult>> {
    let view = TextView::new(text);
    let Some(matcher) = build_matcher(model)? else {
        return Ok(Vec::new());
    };
    if !model.whole_words_only {
        return Ok(matcher.find_all(&view));
    }

    let mut matches = Vec::new();
    let mut offset = 0usize;
    while offset <= view.len() {
        let result = find_whole_word(matcher.as_ref(), &view, offset, SearchDirection::Forward);
        let MatchResult::Found { start, end } = result else {
            break;
        };
        matches.push(result);
        offset = if end > start { end } else { start + 1 };
    }
    Ok(matches)
}

/// 検索モデルに対応するマッチャーを作る。空パターンなら `None`
pub(super) fn build_matcher(model: &SearchModel) -> Result<Option<Box<dyn StringMatcher>>> {
    if model.pattern.is_empty() {
        return Ok(None);
    }
    if model.is_regex {
        let matcher = RegexMatcher::new(&model.pattern, model.case_sensitive)?;
        return Ok(Some(Box::new(matcher)));
    }
    Ok(Some(Box::new(LiteralMatcher::new(
        &model.pattern,
        model.case_sensitive,
    ))))
}

/// 構築済みマッチャーで1回検索する（単語単位フィルタを含む）
pub(super) fn find_with(
    matcher: &dyn StringMatcher,
    text: &TextView<'_>,
    offset: usize,
    model: &SearchModel,
) -> MatchResult {
    let direction = model.search_direction();
    if model.whole_words_only {
        find_whole_word(matcher, text, offset, direction)
    } else {
        matcher.find_at(text, offset, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FindError;

    #[test]
    fn empty_pattern_is_not_found() {
        let model = SearchModel::new("");
        assert_eq!(find("abc", 0, &model).unwrap(), MatchResult::NotFound);
        assert_eq!(
            find("abc", 0, &model.clone().regex(true)).unwrap(),
            MatchResult::NotFound
        );
    }

    #[test]
    fn literal_forward_and_backward() {
        let model = SearchModel::new("ab").case_sensitive(true);
        assert_eq!(find("xxabxab", 3, &model).unwrap(), MatchResult::found(5, 7));
        let backward = model.direction(SearchDirection::Backward);
        assert_eq!(find("xxabxab", 7, &backward).unwrap(), MatchResult::found(5, 7));
        assert_eq!(find("xxabxab", 6, &backward).unwrap(), MatchResult::found(2, 4));
    }

    #[test]
    fn regex_backward_returns_last_qualifying() {
        let model = SearchModel::new("a+")
            .regex(true)
            .direction(SearchDirection::Backward);
        assert_eq!(find("aa_aaa_a", 7, &model).unwrap(), MatchResult::found(3, 6));
    }

    #[test]
    fn bad_regex_fails_explicitly() {
        let model = SearchModel::new("[a-").regex(true);
        let err = find("abc", 0, &model).unwrap_err();
        assert!(matches!(err, FindError::Pattern { .. }));
    }

    #[test]
    fn whole_word_regex() {
        let model = SearchModel::new("c.t").regex(true).whole_words_only(true);
        assert_eq!(find("cutlery cat", 0, &model).unwrap(), MatchResult::found(8, 11));
    }

    #[test]
    fn find_all_respects_whole_words() {
        let model = SearchModel::new("cat").whole_words_only(true);
        let all = find_all("cat catalog cat", &model).unwrap();
        assert_eq!(all, vec![MatchResult::found(0, 3), MatchResult::found(12, 15)]);
    }
}
