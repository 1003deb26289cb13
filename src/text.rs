//! 文字インデックスでアクセスする不変テキストビュー
//!
//! 検索結果のオフセットはすべて文字単位。正規表現エンジンはバイト単位で
//! 動作するため、変換表を前計算しておく

/// 検索対象テキストのビュー
#[derive(Debug, Clone)]
pub struct TextView<'a> {
    text: &'a str,
    /// 文字インデックス→バイト位置（末尾に `text.len()` を持つ）
    byte_offsets: Vec<usize>,
    chars: Vec<char>,
}

impl<'a> TextView<'a> {
    /// テキストからビューを作成
    pub fn new(text: &'a str) -> Self {
        let mut byte_offsets = Vec::with_capacity(text.len() + 1);
        let mut chars = Vec::with_capacity(text.len());
        for (idx, ch) in text.char_indices() {
            byte_offsets.push(idx);
            chars.push(ch);
        }
        byte_offsets.push(text.len());
        Self {
            text,
            byte_offsets,
            chars,
        }
    }

    /// 元の文字列
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// 文字数
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// 空か判定
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// 指定位置の文字
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// 文字スライス
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// 文字インデックスをバイト位置に変換（範囲外は末尾に丸める）
    pub fn char_to_byte(&self, index: usize) -> usize {
        self.byte_offsets[index.min(self.len())]
    }

    /// バイト位置を文字インデックスに変換
    ///
    /// 正規表現のマッチ境界は常に文字境界上にある
    pub fn byte_to_char(&self, byte: usize) -> usize {
        match self.byte_offsets.binary_search(&byte) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    /// 文字範囲 `[start, end)` の部分文字列
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let end = end.min(self.len());
        let start = start.min(end);
        &self.text[self.char_to_byte(start)..self.char_to_byte(end)]
    }

    /// オフセットを `[0, len]` に丸める
    pub fn clamp(&self, offset: usize) -> usize {
        offset.min(self.len())
    }
}

impl<'a> From<&'a str> for TextView<'a> {
    fn from(text: &'a str) -> Self {
        TextView::new(text)
    }
}
