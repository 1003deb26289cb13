//! 検索設定
//!
//! 大文字小文字・単語単位の既定値と、検索／置換文字列の履歴を JSON で保存する

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FindError, Result};

/// 設定ファイルのパスを上書きする環境変数
pub const SETTINGS_PATH_ENV: &str = "ALTRE_FIND_SETTINGS";

/// 履歴の既定の最大件数
pub const DEFAULT_MAX_HISTORY: usize = 30;

/// 検索設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindSettings {
    /// ファイル内検索で大文字小文字を区別するか
    pub local_case_sensitive: bool,
    /// ファイル内検索で単語単位にするか
    pub local_whole_words_only: bool,
    /// 正規表現を既定にするか
    pub regex: bool,
    /// 置換時に大文字小文字を保持するか
    pub preserve_case: bool,
    /// 最近の検索文字列（新しい順）
    pub recent_find_strings: Vec<String>,
    /// 最近の置換文字列（新しい順）
    pub recent_replace_strings: Vec<String>,
    /// 履歴の最大件数
    pub max_history: usize,
}

impl Default for FindSettings {
    fn default() -> Self {
        Self {
            local_case_sensitive: false,
            local_whole_words_only: false,
            regex: false,
            preserve_case: false,
            recent_find_strings: Vec::new(),
            recent_replace_strings: Vec::new(),
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl FindSettings {
    /// 既定の設定ファイルパス
    ///
    /// `ALTRE_FIND_SETTINGS` があれば環境変数・`~` を展開して使い、
    /// なければ `<config_dir>/altre/find.json`
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(raw) = std::env::var(SETTINGS_PATH_ENV) {
            if !raw.is_empty() {
                return Some(expand_path(&raw));
            }
        }
        dirs::config_dir().map(|dir| dir.join("altre").join("find.json"))
    }

    /// ファイルから読み込む。ファイルがなければ既定値
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("find settings not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|err| FindError::settings(path, err))?;
        serde_json::from_str(&content).map_err(|err| FindError::settings(path, err))
    }

    /// ファイルに保存する（親ディレクトリは作成する）
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| FindError::settings(path, err))?;
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|err| FindError::settings(path, err))?;
        fs::write(path, content).map_err(|err| FindError::settings(path, err))
    }

    /// 検索文字列を履歴の先頭に追加
    pub fn add_string_to_find(&mut self, value: &str) {
        push_history(&mut self.recent_find_strings, value, self.max_history);
    }

    /// 置換文字列を履歴の先頭に追加
    pub fn add_string_to_replace(&mut self, value: &str) {
        push_history(&mut self.recent_replace_strings, value, self.max_history);
    }

    /// 最後に使った検索文字列
    pub fn last_find_string(&self) -> Option<&str> {
        self.recent_find_strings.first().map(String::as_str)
    }
}

fn push_history(history: &mut Vec<String>, value: &str, max: usize) {
    if value.is_empty() {
        return;
    }
    history.retain(|existing| existing != value);
    history.insert(0, value.to_string());
    history.truncate(max.max(1));
}

fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(err) => {
            log::warn!("cannot expand {}: {}", raw, err);
            PathBuf::from(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn history_is_deduplicated_and_bounded() {
        let mut settings = FindSettings {
            max_history: 3,
            ..FindSettings::default()
        };
        for value in ["a", "b", "c", "a", "d", ""] {
            settings.add_string_to_find(value);
        }
        assert_eq!(settings.recent_find_strings, vec!["d", "a", "c"]);
        assert_eq!(settings.last_find_string(), Some("d"));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("find.json");
        let mut settings = FindSettings::default();
        settings.local_case_sensitive = true;
        settings.add_string_to_replace("bar");
        settings.save(&path).unwrap();

        let loaded = FindSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let loaded = FindSettings::load(&dir.path().join("none.json")).unwrap();
        assert_eq!(loaded, FindSettings::default());
    }

    #[test]
    fn malformed_file_is_settings_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("find.json");
        fs::write(&path, "{ not json").unwrap();
        let err = FindSettings::load(&path).unwrap_err();
        assert!(matches!(err, FindError::Settings { .. }));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("find.json");
        fs::write(&path, r#"{"local_whole_words_only": true}"#).unwrap();
        let loaded = FindSettings::load(&path).unwrap();
        assert!(loaded.local_whole_words_only);
        assert_eq!(loaded.max_history, DEFAULT_MAX_HISTORY);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("find.json");
        fs::write(&path, r#"{"case_sensitive": true, "whole_words_only": true, "regex": true}"#)
            .unwrap();
        let loaded = FindSettings::load(&path).unwrap();
        assert!(loaded.regex);
        assert!(!loaded.local_case_sensitive);
        assert!(!loaded.local_whole_words_only);
    }
}
