//! ハイライト範囲の巡回ナビゲーション
//!
//! 「すべて検索」で作られたハイライト範囲を文書順に次／前へ選択する。
//! 端に達したら一度だけ「これ以上見つかりません」を通知し、次の呼び出しで
//! 反対側の端から折り返す

mod registry;

pub use registry::{DocumentId, NavigatorRegistry};

/// 外部のハイライト層が保持する範囲（ナビゲーターは読むだけ）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRange {
    /// 開始位置（文字インデックス）
    pub start: usize,
    /// 終了位置（文字インデックス、排他的）
    pub end: usize,
    /// 範囲がまだ有効か（文書編集で無効化されうる）
    pub is_valid: bool,
}

impl HighlightRange {
    /// 有効な範囲を作成
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            is_valid: true,
        }
    }

    /// 無効化した複製
    pub fn invalidated(self) -> Self {
        Self {
            is_valid: false,
            ..self
        }
    }

    /// 選択候補になりうるか
    pub fn is_selectable(&self) -> bool {
        self.is_valid && self.start < self.end
    }
}

/// 選択後のスクロール位置のヒント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollHint {
    /// 選択範囲を中央より下寄せ（上から近づいた）
    CenterDown,
    /// 選択範囲を中央より上寄せ（下から近づいた）
    CenterUp,
}

/// ナビゲーション結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// 範囲を選択した
    Selected {
        start: usize,
        end: usize,
        /// 文書の上側から近づいたか
        approached_from_top: bool,
        /// 折り返し後の選択か
        wrapped: bool,
        scroll: ScrollHint,
    },
    /// 1周目で見つからなかった（次の呼び出しで折り返す）
    FirstPassExhausted { forward: bool },
    /// 折り返しても見つからなかった
    NotFound,
}

impl SelectionOutcome {
    /// 選択された範囲
    pub fn selected_range(&self) -> Option<(usize, usize)> {
        match self {
            SelectionOutcome::Selected { start, end, .. } => Some((*start, *end)),
            _ => None,
        }
    }

    /// UIに表示する通知メッセージ
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SelectionOutcome::FirstPassExhausted { forward: true } => {
                Some("No more highlights found, search again from top")
            }
            SelectionOutcome::FirstPassExhausted { forward: false } => {
                Some("No more highlights found, search again from bottom")
            }
            _ => None,
        }
    }
}

/// 文書（エディタ）ごとのナビゲーション状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigatorState {
    /// 直前の巡回が1周目で尽きたか
    pub exhausted_once: bool,
}

impl NavigatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 状態をリセット
    pub fn reset(&mut self) {
        self.exhausted_once = false;
    }
}

/// 次（前）のハイライト範囲を選択する
///
/// `document_len` は後方折り返し時の開始位置として使う。
/// 折り返しは1回の呼び出しにつき最大1回
pub fn select_next(
    ranges: &[HighlightRange],
    offset: usize,
    forward: bool,
    document_len: usize,
    state: &mut NavigatorState,
) -> SelectionOutcome {
    let mut offset = offset;
    let mut second_pass = false;

    loop {
        if let Some(range) = pick_candidate(ranges, offset, forward, second_pass) {
            state.reset();
            let approached_from_top = forward != second_pass;
            log::debug!(
                "selected highlight {}..{} (wrapped: {})",
                range.start,
                range.end,
                second_pass
            );
            return SelectionOutcome::Selected {
                start: range.start,
                end: range.end,
                approached_from_top,
                wrapped: second_pass,
                scroll: if approached_from_top {
                    ScrollHint::CenterDown
                } else {
                    ScrollHint::CenterUp
                },
            };
        }

        if !state.exhausted_once {
            state.exhausted_once = true;
            return SelectionOutcome::FirstPassExhausted { forward };
        }
        if second_pass {
            return SelectionOutcome::NotFound;
        }

        offset = if forward { 0 } else { document_len };
        second_pass = true;
    }
}

/// 前方なら `offset` より後ろで開始が最小、後方なら `offset` より前で終了が最大の範囲
///
/// 折り返し中は `offset` ちょうどの境界も許可する
fn pick_candidate(
    ranges: &[HighlightRange],
    offset: usize,
    forward: bool,
    second_pass: bool,
) -> Option<&HighlightRange> {
    let selectable = ranges.iter().filter(|range| range.is_selectable());
    if forward {
        selectable
            .filter(|range| range.start > offset || (second_pass && range.start == offset))
            .min_by_key(|range| range.start)
    } else {
        selectable
            .filter(|range| range.end < offset || (second_pass && range.end == offset))
            .max_by_key(|range| range.end)
    }
}
