//! 検索セッション
//!
//! ファイル内検索モデル、「次を検索」モデル、文書ごとのナビゲーション状態をまとめて保持する

use crate::error::Result;
use crate::navigator::{
    select_next, DocumentId, HighlightRange, NavigatorRegistry, SelectionOutcome,
};
use crate::search::{self, MatchResult, SearchDirection, SearchModel};
use crate::settings::FindSettings;

/// 検索ダイアログ確定の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// 受理された
    Accepted,
    /// 検索文字列が空のため却下
    EmptyPattern,
}

/// 「次を検索」「前を検索」の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindNextOutcome {
    /// ハイライト範囲を巡回した
    Highlight(SelectionOutcome),
    /// テキストを直接検索した
    Text(MatchResult),
}

/// 1プロジェクト分の検索状態
#[derive(Debug)]
pub struct FindSession {
    find_in_file_model: SearchModel,
    find_next_model: Option<SearchModel>,
    find_was_performed: bool,
    navigators: NavigatorRegistry,
}

impl FindSession {
    /// 設定の既定値でセッションを作成
    pub fn new(settings: &FindSettings) -> Self {
        let mut model = SearchModel::from_settings(settings);
        if let Some(last) = settings.last_find_string() {
            model.pattern = last.to_string();
        }
        Self {
            find_in_file_model: model,
            find_next_model: None,
            find_was_performed: false,
            navigators: NavigatorRegistry::new(),
        }
    }

    pub fn find_in_file_model(&self) -> &SearchModel {
        &self.find_in_file_model
    }

    pub fn find_in_file_model_mut(&mut self) -> &mut SearchModel {
        &mut self.find_in_file_model
    }

    /// ファイル内検索が一度でも実行されたか
    pub fn find_was_performed(&self) -> bool {
        self.find_was_performed
    }

    pub fn set_find_was_performed(&mut self) {
        self.find_was_performed = true;
    }

    pub fn find_next_model(&self) -> Option<&SearchModel> {
        self.find_next_model.as_ref()
    }

    pub fn set_find_next_model(&mut self, model: Option<SearchModel>) {
        self.find_next_model = model;
    }

    /// 検索フィールドの文字列を考慮した「次を検索」モデル
    ///
    /// フィールドの文字列がファイル内検索モデルと異なる場合は、
    /// 検索文字列だけ差し替えた複製を返す
    pub fn find_next_model_for(&self, field_text: Option<&str>) -> Option<SearchModel> {
        let model = self.find_next_model.as_ref()?;
        match field_text {
            Some(text) if text != self.find_in_file_model.pattern => Some(model.with_pattern(text)),
            _ => Some(model.clone()),
        }
    }

    /// 検索ダイアログの確定処理
    ///
    /// 履歴へ記録し、ファイル内検索モデルと「次を検索」モデルを更新する
    pub fn commit_find(&mut self, model: SearchModel, settings: &mut FindSettings) -> CommitOutcome {
        if model.pattern.is_empty() {
            return CommitOutcome::EmptyPattern;
        }

        settings.add_string_to_find(&model.pattern);
        if model.is_replace {
            settings.add_string_to_replace(&model.replacement);
        }
        settings.local_case_sensitive = model.case_sensitive;
        settings.local_whole_words_only = model.whole_words_only;

        self.set_find_was_performed();
        self.find_next_model = Some(model.clone());
        self.find_in_file_model = model;
        CommitOutcome::Accepted
    }

    /// 「次を検索」モデルでテキストを検索
    pub fn find_next_in_text(
        &self,
        text: &str,
        offset: usize,
        field_text: Option<&str>,
    ) -> Result<MatchResult> {
        match self.find_next_model_for(field_text) {
            Some(model) => search::find(text, offset, &model),
            None => Ok(MatchResult::NotFound),
        }
    }

    /// 「次を検索」
    ///
    /// 「次を検索」モデルがあり、`search_highlighters` が有効で、ハイライト範囲が
    /// 空でなければ範囲を巡回する。それ以外はキャレット位置からテキストを検索する
    pub fn find_next(
        &mut self,
        document: DocumentId,
        ranges: &[HighlightRange],
        text: &str,
        caret: usize,
        field_text: Option<&str>,
    ) -> Result<FindNextOutcome> {
        self.find_in_direction(document, ranges, text, caret, field_text, true)
    }

    /// 「前を検索」。規則は `find_next` と同じ
    pub fn find_previous(
        &mut self,
        document: DocumentId,
        ranges: &[HighlightRange],
        text: &str,
        caret: usize,
        field_text: Option<&str>,
    ) -> Result<FindNextOutcome> {
        self.find_in_direction(document, ranges, text, caret, field_text, false)
    }

    fn find_in_direction(
        &mut self,
        document: DocumentId,
        ranges: &[HighlightRange],
        text: &str,
        caret: usize,
        field_text: Option<&str>,
        forward: bool,
    ) -> Result<FindNextOutcome> {
        let Some(model) = self.find_next_model_for(field_text) else {
            return Ok(FindNextOutcome::Text(MatchResult::NotFound));
        };

        if model.search_highlighters && !ranges.is_empty() {
            let document_len = text.chars().count();
            let state = self.navigators.state_mut(document);
            let outcome = select_next(ranges, caret, forward, document_len, state);
            return Ok(FindNextOutcome::Highlight(outcome));
        }

        let model = model.direction(SearchDirection::from_forward(forward));
        search::find(text, caret, &model).map(FindNextOutcome::Text)
    }

    /// 文書を閉じた
    pub fn close_document(&mut self, document: DocumentId) {
        self.navigators.forget(document);
    }

    pub fn navigators(&self) -> &NavigatorRegistry {
        &self.navigators
    }
}

impl Default for FindSession {
    fn default() -> Self {
        Self::new(&FindSettings::default())
    }
}
