//! 行データ
//!
//! 改行を含まないバイト列として1行を保持する

/// テキストの1行（終端の改行は保持しない）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    chars: Vec<u8>,
}

impl Row {
    /// 空の行を作成
    pub fn new() -> Self {
        Self { chars: Vec::new() }
    }

    /// バイト列から行を作成
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            chars: bytes.to_vec(),
        }
    }

    /// 保持しているバイト数
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.chars
    }

    /// `at` の位置にバイトを挿入（`at` は行長以下）
    pub fn insert(&mut self, at: usize, byte: u8) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, byte);
    }

    /// `at` の位置のバイトを削除
    pub fn remove(&mut self, at: usize) -> Option<u8> {
        if at < self.chars.len() {
            Some(self.chars.remove(at))
        } else {
            None
        }
    }

    /// 行末に別のバイト列を連結
    pub fn append(&mut self, bytes: &[u8]) {
        self.chars.extend_from_slice(bytes);
    }

    /// `at` で行を切り詰め、残りを新しい行として返す
    pub fn split_off(&mut self, at: usize) -> Row {
        let at = at.min(self.chars.len());
        Row {
            chars: self.chars.split_off(at),
        }
    }

    /// 表示用に `[start, start + width)` を切り出す（範囲外は空）
    pub fn visible_slice(&self, start: usize, width: usize) -> &[u8] {
        if start >= self.chars.len() {
            return &[];
        }
        let end = start.saturating_add(width).min(self.chars.len());
        &self.chars[start..end]
    }
}

impl From<&str> for Row {
    fn from(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}
