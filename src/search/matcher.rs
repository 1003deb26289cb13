//! 検索用マッチャー

use super::types::{MatchResult, SearchDirection};
use crate::text::TextView;

/// 文字列マッチング戦略
pub trait StringMatcher {
    /// `offset` から指定方向に最も近いマッチを返す
    ///
    /// 前方: 開始位置が `offset` 以上の最初のマッチ
    /// 後方: `offset` より前で終わる最後のマッチ
    fn find_at(&self, text: &TextView<'_>, offset: usize, direction: SearchDirection)
        -> MatchResult;

    /// テキスト全体の重ならないマッチをすべて返す
    fn find_all(&self, text: &TextView<'_>) -> Vec<MatchResult> {
        let mut matches = Vec::new();
        let mut offset = 0usize;
        while offset <= text.len() {
            let result = self.find_at(text, offset, SearchDirection::Forward);
            let MatchResult::Found { start, end } = result else {
                break;
            };
            matches.push(result);
            offset = if end > start { end } else { start + 1 };
        }
        matches
    }
}

/// リテラル文字列マッチャー
#[derive(Debug, Clone)]
pub struct LiteralMatcher {
    pattern: Vec<char>,
    case_sensitive: bool,
}

impl LiteralMatcher {
    /// インスタンスを作成
    pub fn new(pattern: &str, case_sensitive: bool) -> Self {
        Self {
            pattern: pattern.chars().collect(),
            case_sensitive,
        }
    }

    fn matches_at(&self, chars: &[char], start: usize) -> bool {
        self.pattern
            .iter()
            .enumerate()
            .all(|(offset, pat_ch)| chars_equal(chars[start + offset], *pat_ch, self.case_sensitive))
    }
}

impl StringMatcher for LiteralMatcher {
    fn find_at(
        &self,
        text: &TextView<'_>,
        offset: usize,
        direction: SearchDirection,
    ) -> MatchResult {
        let chars = text.chars();
        let pattern_len = self.pattern.len();
        let offset = text.clamp(offset);

        if pattern_len == 0 {
            return MatchResult::NotFound;
        }

        match direction {
            // [offset, len) を前から走査
            SearchDirection::Forward => {
                if pattern_len > chars.len() - offset {
                    return MatchResult::NotFound;
                }
                let last_start = chars.len() - pattern_len;
                (offset..=last_start)
                    .find(|&start| self.matches_at(chars, start))
                    .map(|start| MatchResult::found(start, start + pattern_len))
                    .unwrap_or(MatchResult::NotFound)
            }
            // [0, offset) を後ろから走査し、最も近い直前のマッチを返す
            SearchDirection::Backward => {
                if pattern_len > offset {
                    return MatchResult::NotFound;
                }
                let last_start = offset - pattern_len;
                (0..=last_start)
                    .rev()
                    .find(|&start| self.matches_at(chars, start))
                    .map(|start| MatchResult::found(start, start + pattern_len))
                    .unwrap_or(MatchResult::NotFound)
            }
        }
    }
}

/// ロケール非依存の大文字小文字同一視で文字を比較
fn chars_equal(a: char, b: char, case_sensitive: bool) -> bool {
    if a == b {
        return true;
    }
    if case_sensitive {
        return false;
    }

    // Unicodeケースフォールディング（簡易）
    a.to_lowercase().eq(b.to_lowercase()) || a.to_uppercase().eq(b.to_uppercase())
}
