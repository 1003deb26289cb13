//! 置換文字列の生成

use super::regex::{unescape_template, FullMatcher, ReplacementTemplate};
use super::types::{MatchResult, SearchModel};
use super::{build_matcher, find_with};
use crate::error::Result;
use crate::text::TextView;

/// マッチしたテキストに挿入する置換文字列を計算する
///
/// 置換モードでなければ `None`。正規表現モードでパターンが `found` 全体に
/// マッチしない場合（文脈依存の構文など）はテンプレートをそのまま返す
pub fn compute_replacement(found: &str, model: &SearchModel) -> Result<Option<String>> {
    if !model.is_replace {
        return Ok(None);
    }
    let full = full_matcher_for(model)?;
    replacement_for(found, model, full.as_ref()).map(Some)
}

/// 正規表現モードのときだけ全体一致用マッチャーを作る
fn full_matcher_for(model: &SearchModel) -> Result<Option<FullMatcher>> {
    if !model.is_regex {
        return Ok(None);
    }
    FullMatcher::new(&model.pattern, model.case_sensitive).map(Some)
}

fn replacement_for(found: &str, model: &SearchModel, full: Option<&FullMatcher>) -> Result<String> {
    let template = &model.replacement;
    let Some(full) = full else {
        if model.preserve_case {
            return Ok(replace_with_case_respect(template, found));
        }
        return Ok(template.clone());
    };

    let Some(captures) = full.captures(found) else {
        log::debug!(
            "pattern {:?} does not match {:?} on its own; using template verbatim",
            model.pattern,
            found
        );
        return Ok(template.clone());
    };

    let unescaped = unescape_template(template);
    let parsed = ReplacementTemplate::parse(&unescaped, full.regex()).map_err(|err| {
        log::warn!("{}", err);
        err
    })?;
    Ok(parsed.render(&captures))
}

/// 大文字小文字のパターンを `found` に合わせた置換文字列
///
/// 先頭文字は `found` の先頭に合わせ、残りは `found` の2文字目以降が
/// すべて大文字なら大文字、すべて小文字なら小文字、混在なら変更しない
pub fn replace_with_case_respect(template: &str, found: &str) -> String {
    let mut found_chars = found.chars();
    let mut template_chars = template.chars();
    let (Some(found_first), Some(template_first)) = (found_chars.next(), template_chars.next())
    else {
        return template.to_string();
    };

    let mut output = String::with_capacity(template.len());
    if found_first.is_uppercase() {
        output.extend(template_first.to_uppercase());
    } else {
        output.extend(template_first.to_lowercase());
    }

    let rest = template_chars.as_str();
    if rest.is_empty() {
        return output;
    }

    let found_tail = found_chars.as_str();
    if found_tail.is_empty() {
        output.push_str(rest);
        return output;
    }

    let tail_upper = found_tail.chars().all(char::is_uppercase);
    let tail_lower = found_tail.chars().all(char::is_lowercase);
    if tail_upper {
        output.push_str(&rest.to_uppercase());
    } else if tail_lower {
        output.push_str(&rest.to_lowercase());
    } else {
        output.push_str(rest);
    }
    output
}

/// 置換結果の集計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceSummary {
    /// 置換後のテキスト
    pub text: String,
    /// 置換した件数
    pub replaced: usize,
}

/// テキスト内のマッチをすべて置換する
///
/// 検索は常に先頭から前方へ行い、各マッチに `compute_replacement` と同じ規則を適用する。
/// パターンのコンパイルはループの外で1回だけ行う
pub fn replace_all(text: &str, model: &SearchModel) -> Result<ReplaceSummary> {
    let unchanged = || ReplaceSummary {
        text: text.to_string(),
        replaced: 0,
    };
    if !model.is_replace {
        return Ok(unchanged());
    }

    let forward = SearchModel {
        forward: true,
        ..model.clone()
    };
    let Some(matcher) = build_matcher(&forward)? else {
        return Ok(unchanged());
    };
    let full = full_matcher_for(&forward)?;

    let view = TextView::new(text);
    let mut output = String::with_capacity(text.len());
    let mut copied_to = 0usize;
    let mut offset = 0usize;
    let mut replaced = 0usize;

    while offset <= view.len() {
        let MatchResult::Found { start, end } = find_with(matcher.as_ref(), &view, offset, &forward)
        else {
            break;
        };
        let found = view.slice(start, end);
        let replacement = replacement_for(found, &forward, full.as_ref())?;

        output.push_str(view.slice(copied_to, start));
        output.push_str(&replacement);
        copied_to = end;
        replaced += 1;

        offset = if end > start { end } else { end + 1 };
        if end == start && start < view.len() {
            // 空マッチでは1文字だけ元の文字をそのまま残す
            output.push_str(view.slice(start, start + 1));
            copied_to = start + 1;
        }
    }

    output.push_str(view.slice(copied_to, view.len()));
    Ok(ReplaceSummary {
        text: output,
        replaced,
    })
}
