use regex::{Captures, Regex, RegexBuilder};
use regex_syntax::hir::{Hir, Look};
use regex_syntax::ParserBuilder;

use super::matcher::StringMatcher;
use super::types::{MatchResult, SearchDirection};
use crate::error::{FindError, Result};
use crate::text::TextView;

/// 正規表現マッチャー
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// 行単位アンカー、改行に `.` をマッチさせない設定でコンパイル
    pub fn new(pattern: &str, case_sensitive: bool) -> Result<Self> {
        let regex = build(pattern, case_sensitive)?;
        Ok(Self { regex })
    }
}

impl StringMatcher for RegexMatcher {
    fn find_at(
        &self,
        text: &TextView<'_>,
        offset: usize,
        direction: SearchDirection,
    ) -> MatchResult {
        let haystack = text.as_str();
        let offset_byte = text.char_to_byte(offset);

        match direction {
            SearchDirection::Forward => {
                let Some(mat) = self.regex.find_at(haystack, offset_byte) else {
                    return MatchResult::NotFound;
                };
                if mat.end() > haystack.len() {
                    return MatchResult::NotFound;
                }
                MatchResult::found(text.byte_to_char(mat.start()), text.byte_to_char(mat.end()))
            }
            // 正規表現は逆方向に走査できないので、先頭から走査して
            // offset より前で終わる最後のマッチを残す
            SearchDirection::Backward => self
                .regex
                .find_iter(haystack)
                .take_while(|mat| mat.end() < offset_byte)
                .last()
                .map(|mat| {
                    MatchResult::found(text.byte_to_char(mat.start()), text.byte_to_char(mat.end()))
                })
                .unwrap_or(MatchResult::NotFound),
        }
    }
}

/// 置換用：入力全体へのマッチを要求する正規表現
#[derive(Debug, Clone)]
pub struct FullMatcher {
    regex: Regex,
}

impl FullMatcher {
    /// パターンを構文木に解析してから `\A` と `\z` で挟む
    ///
    /// 文字列連結では `(?x)` の行末コメントが閉じ括弧を飲み込むため、
    /// 構文木を経由する。大文字小文字・行アンカーの設定は構文木に畳み込まれ、
    /// キャプチャの順序（グループ番号）は変わらない
    pub fn new(pattern: &str, case_sensitive: bool) -> Result<Self> {
        let hir = ParserBuilder::new()
            .case_insensitive(!case_sensitive)
            .multi_line(true)
            .dot_matches_new_line(false)
            .build()
            .parse(pattern)
            .map_err(|err| {
                log::warn!("bad pattern {:?}: {}", pattern, err);
                FindError::pattern(pattern, err)
            })?;
        let anchored = Hir::concat(vec![Hir::look(Look::Start), hir, Hir::look(Look::End)]);
        let regex = Regex::new(&anchored.to_string())
            .map_err(|err| FindError::pattern(pattern, err))?;
        Ok(Self { regex })
    }

    /// 入力全体にマッチした場合のキャプチャ
    pub fn captures<'t>(&self, input: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(input)
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

fn build(pattern: &str, case_sensitive: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .multi_line(true)
        .dot_matches_new_line(false)
        .build()
        .map_err(|err| {
            log::warn!("bad pattern {:?}: {}", pattern, err);
            FindError::pattern(pattern, err)
        })
}

/// 置換テンプレート
#[derive(Debug, Clone)]
pub struct ReplacementTemplate {
    parts: Vec<TemplatePart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplatePart {
    Literal(String),
    Group(usize),
    Named(String),
}

impl ReplacementTemplate {
    /// テンプレートを解析する
    ///
    /// `$n` / `${n}` / `${name}` でグループ参照、`\x` で文字 `x` そのもの。
    /// 存在しないグループや単独の `$` はエラー
    pub fn parse(template: &str, regex: &Regex) -> Result<Self> {
        let group_count = regex.captures_len().saturating_sub(1);
        let invalid = |message: String| FindError::invalid_replacement(template, message);

        let mut chars = template.chars().peekable();
        let mut parts = Vec::new();
        let mut literal = String::new();

        while let Some(ch) = chars.next() {
            match ch {
                '\\' => match chars.next() {
                    Some(next) => literal.push(next),
                    None => return Err(invalid("character to be escaped is missing".into())),
                },
                '$' => {
                    let part = match chars.next() {
                        Some('{') => {
                            let mut name = String::new();
                            loop {
                                match chars.next() {
                                    Some('}') => break,
                                    Some(c) => name.push(c),
                                    None => {
                                        return Err(invalid("unterminated group name".into()))
                                    }
                                }
                            }
                            if name.is_empty() {
                                return Err(invalid("empty group name".into()));
                            }
                            if let Ok(index) = name.parse::<usize>() {
                                if index > group_count {
                                    return Err(invalid(format!("no group {}", index)));
                                }
                                TemplatePart::Group(index)
                            } else {
                                if !regex.capture_names().flatten().any(|n| n == name) {
                                    return Err(invalid(format!("no group named <{}>", name)));
                                }
                                TemplatePart::Named(name)
                            }
                        }
                        Some(digit) if digit.is_ascii_digit() => {
                            let mut index = digit.to_digit(10).unwrap_or(0) as usize;
                            if index > group_count {
                                return Err(invalid(format!("no group {}", index)));
                            }
                            // 有効なグループ番号である限り桁を読み進める
                            while let Some(next) = chars.peek().and_then(|c| c.to_digit(10)) {
                                let candidate = index * 10 + next as usize;
                                if candidate > group_count {
                                    break;
                                }
                                index = candidate;
                                chars.next();
                            }
                            TemplatePart::Group(index)
                        }
                        _ => return Err(invalid("illegal group reference".into())),
                    };
                    if !literal.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(part);
                }
                other => literal.push(other),
            }
        }

        if !literal.is_empty() {
            parts.push(TemplatePart::Literal(literal));
        }

        Ok(Self { parts })
    }

    /// キャプチャを埋め込んで文字列化する（不参加グループは空文字）
    pub fn render(&self, captures: &Captures<'_>) -> String {
        let mut output = String::new();
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => output.push_str(text),
                TemplatePart::Group(index) => {
                    if let Some(mat) = captures.get(*index) {
                        output.push_str(mat.as_str());
                    }
                }
                TemplatePart::Named(name) => {
                    if let Some(mat) = captures.name(name) {
                        output.push_str(mat.as_str());
                    }
                }
            }
        }
        output
    }
}

/// 置換文字列中のエスケープシーケンスを展開する
///
/// `\n` `\t` `\r` `\f` `\b` `\'` `\"` `\uXXXX` のみ変換し、
/// それ以外（`\\` `\$` など）はバックスラッシュごと残す。
/// 残したエスケープは `ReplacementTemplate::parse` が1文字のリテラルとして扱うので、
/// 最終的に `\\` は `\`、`\$` は `$` になる（先に `\\` を `\` に畳む処理はしない）
pub fn unescape_template(template: &str) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut output = String::with_capacity(template.len());
    let mut idx = 0usize;

    while idx < chars.len() {
        let ch = chars[idx];
        if ch != '\\' || idx + 1 >= chars.len() {
            output.push(ch);
            idx += 1;
            continue;
        }

        let next = chars[idx + 1];
        match next {
            'n' => output.push('\n'),
            't' => output.push('\t'),
            'r' => output.push('\r'),
            'f' => output.push('\u{c}'),
            'b' => output.push('\u{8}'),
            '\'' => output.push('\''),
            '"' => output.push('"'),
            'u' => {
                let hex: String = chars.iter().skip(idx + 2).take(4).collect();
                let decoded = if hex.chars().count() == 4 {
                    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
                } else {
                    None
                };
                match decoded {
                    Some(decoded) => {
                        output.push(decoded);
                        idx += 6;
                        continue;
                    }
                    None => {
                        output.push('\\');
                        output.push('u');
                    }
                }
            }
            other => {
                output.push('\\');
                output.push(other);
            }
        }
        idx += 2;
    }

    output
}
