//! altre-find - 検索・置換エンジン
//!
//! リテラル／正規表現検索、単語単位フィルタ、大文字小文字を保持する置換、
//! ハイライト範囲の巡回ナビゲーションを提供

// コアモジュール
pub mod error;
pub mod logging;

// データ層
pub mod text;

// ロジック層
pub mod navigator;
pub mod search;

// 設定・状態
pub mod session;
pub mod settings;

// 公開API
pub use error::{FindError, Result};
pub use navigator::{
    select_next, DocumentId, HighlightRange, NavigatorRegistry, NavigatorState, ScrollHint,
    SelectionOutcome,
};
pub use search::{
    compute_replacement, find, find_all, replace_all, MatchResult, SearchDirection, SearchModel,
};
pub use session::{FindNextOutcome, FindSession};
pub use settings::FindSettings;
pub use text::TextView;
