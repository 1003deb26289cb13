//! エラーハンドリング
//!
//! 検索・置換エンジン全体で使用されるエラー型を定義
//! 「見つからない」はエラーではなく `MatchResult::NotFound` で表現する

use std::path::PathBuf;
use thiserror::Error;

/// 検索エンジンのエラー型
#[derive(Error, Debug)]
pub enum FindError {
    /// 正規表現のコンパイル失敗
    #[error("Bad pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },

    /// 置換テンプレートの不正（グループ参照エラーなど）
    #[error("Invalid replacement string `{template}`: {message}")]
    InvalidReplacement { template: String, message: String },

    /// 設定ファイルの読み書き失敗
    #[error("Settings error ({path}): {message}")]
    Settings { path: PathBuf, message: String },
}

impl FindError {
    /// パターンエラーを作成
    pub fn pattern(pattern: impl Into<String>, err: impl ToString) -> Self {
        FindError::Pattern {
            pattern: pattern.into(),
            message: err.to_string(),
        }
    }

    /// 置換エラーを作成
    pub fn invalid_replacement(template: impl Into<String>, message: impl Into<String>) -> Self {
        FindError::InvalidReplacement {
            template: template.into(),
            message: message.into(),
        }
    }

    /// 設定エラーを作成
    pub fn settings(path: impl Into<PathBuf>, err: impl ToString) -> Self {
        FindError::Settings {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// ユーザー向けの短いメッセージ
    pub fn user_message(&self) -> String {
        match self {
            FindError::Pattern { message, .. } => format!("Bad pattern: {}", message),
            FindError::InvalidReplacement { .. } => "Invalid replacement string".to_string(),
            FindError::Settings { path, .. } => {
                format!("Cannot access find settings: {}", path.display())
            }
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, FindError>;
