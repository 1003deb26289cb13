//! 検索関連の共通型

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use crate::settings::FindSettings;

/// 検索方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchDirection {
    /// 前方検索
    Forward,
    /// 後方検索
    Backward,
}

impl SearchDirection {
    /// `forward` フラグから変換
    pub fn from_forward(forward: bool) -> Self {
        if forward {
            SearchDirection::Forward
        } else {
            SearchDirection::Backward
        }
    }

    /// 前方か判定
    pub fn is_forward(self) -> bool {
        matches!(self, SearchDirection::Forward)
    }
}

/// 1回の検索結果
///
/// 「見つからない」は共有インスタンスではなく値として表現する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchResult {
    /// マッチあり（文字インデックス、終端は排他的）
    Found { start: usize, end: usize },
    /// マッチなし
    NotFound,
}

impl MatchResult {
    /// マッチを作成
    pub fn found(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        MatchResult::Found { start, end }
    }

    /// 見つかったか
    pub fn is_found(&self) -> bool {
        matches!(self, MatchResult::Found { .. })
    }

    pub fn start(&self) -> Option<usize> {
        match self {
            MatchResult::Found { start, .. } => Some(*start),
            MatchResult::NotFound => None,
        }
    }

    pub fn end(&self) -> Option<usize> {
        match self {
            MatchResult::Found { end, .. } => Some(*end),
            MatchResult::NotFound => None,
        }
    }

    /// 範囲として取得
    pub fn range(&self) -> Option<Range<usize>> {
        match self {
            MatchResult::Found { start, end } => Some(*start..*end),
            MatchResult::NotFound => None,
        }
    }

    /// マッチ長（文字数）。見つからない場合は0
    pub fn len(&self) -> usize {
        self.range().map(|r| r.len()).unwrap_or(0)
    }

    /// 空マッチまたは未検出か判定
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 検索・置換の設定一式
///
/// 1回の検索呼び出しの間は不変。「次を検索」で使い回してもよい
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchModel {
    /// 検索文字列
    pub pattern: String,
    /// 正規表現として扱うか
    pub is_regex: bool,
    /// 大文字小文字を区別するか
    pub case_sensitive: bool,
    /// 前方検索か
    pub forward: bool,
    /// 単語単位でのみマッチさせるか
    pub whole_words_only: bool,
    /// 置換文字列
    pub replacement: String,
    /// 置換時に大文字小文字を保持するか
    pub preserve_case: bool,
    /// 置換モードか
    pub is_replace: bool,
    /// 「次を検索」でハイライト範囲を巡回するか
    pub search_highlighters: bool,
}

impl Default for SearchModel {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            is_regex: false,
            case_sensitive: false,
            forward: true,
            whole_words_only: false,
            replacement: String::new(),
            preserve_case: false,
            is_replace: false,
            search_highlighters: false,
        }
    }
}

impl SearchModel {
    /// 検索文字列を指定して作成
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// 設定の既定値から作成
    pub fn from_settings(settings: &FindSettings) -> Self {
        Self {
            case_sensitive: settings.local_case_sensitive,
            whole_words_only: settings.local_whole_words_only,
            is_regex: settings.regex,
            preserve_case: settings.preserve_case,
            ..Self::default()
        }
    }

    /// 検索文字列だけ差し替えた複製
    pub fn with_pattern(&self, pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..self.clone()
        }
    }

    pub fn regex(mut self, value: bool) -> Self {
        self.is_regex = value;
        self
    }

    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    pub fn whole_words_only(mut self, value: bool) -> Self {
        self.whole_words_only = value;
        self
    }

    /// 検索方向を設定
    pub fn direction(mut self, direction: SearchDirection) -> Self {
        self.forward = direction.is_forward();
        self
    }

    /// 置換モードにして置換文字列を設定
    pub fn replace_with(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = replacement.into();
        self.is_replace = true;
        self
    }

    pub fn preserve_case(mut self, value: bool) -> Self {
        self.preserve_case = value;
        self
    }

    /// ハイライト範囲の巡回を有効にする
    pub fn search_highlighters(mut self, value: bool) -> Self {
        self.search_highlighters = value;
        self
    }

    /// 現在の検索方向
    pub fn search_direction(&self) -> SearchDirection {
        SearchDirection::from_forward(self.forward)
    }
}

impl fmt::Display for SearchModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SearchModel {{ pattern: {:?}, regex: {}, case_sensitive: {}, forward: {}, whole_words: {}",
            self.pattern, self.is_regex, self.case_sensitive, self.forward, self.whole_words_only
        )?;
        if self.is_replace {
            write!(
                f,
                ", replacement: {:?}, preserve_case: {}",
                self.replacement, self.preserve_case
            )?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_value_equal() {
        assert_eq!(MatchResult::NotFound, MatchResult::NotFound);
        assert_eq!(MatchResult::NotFound.start(), None);
        assert!(MatchResult::NotFound.is_empty());
    }

    #[test]
    fn found_accessors() {
        let result = MatchResult::found(3, 7);
        assert!(result.is_found());
        assert_eq!(result.range(), Some(3..7));
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn builder_sets_replace_mode() {
        let model = SearchModel::new("foo")
            .direction(SearchDirection::Backward)
            .replace_with("bar");
        assert!(!model.forward);
        assert!(model.is_replace);
        assert_eq!(model.search_direction(), SearchDirection::Backward);
    }

    #[test]
    fn with_pattern_keeps_flags() {
        let model = SearchModel::new("foo").regex(true).case_sensitive(true);
        let patched = model.with_pattern("bar");
        assert_eq!(patched.pattern, "bar");
        assert!(patched.is_regex);
        assert!(patched.case_sensitive);
    }

    #[test]
    fn display_omits_replacement_outside_replace_mode() {
        let shown = SearchModel::new("x").to_string();
        assert!(!shown.contains("replacement"));
    }

    #[test]
    fn deserializes_partial_json() {
        let model: SearchModel = serde_json::from_str(r#"{"pattern":"a+","is_regex":true}"#).unwrap();
        assert!(model.is_regex);
        assert!(model.forward);
        assert!(!model.search_highlighters);
    }

    #[test]
    fn search_highlighters_survives_pattern_patch() {
        let model = SearchModel::new("foo").search_highlighters(true);
        assert!(model.with_pattern("bar").search_highlighters);
    }
}
