//! テキストバッファ
//!
//! 行の順序付きコレクションと、バイト単位の挿入・削除・分割・結合を実装する。
//! 位置の前提条件（`cx <= 行長`、`cy <= 行数`）はカーソル側のクランプで保証される

use super::cursor::Cursor;
use super::row::Row;

/// 行単位のテキストバッファ
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rows: Vec<Row>,
    dirty: bool,
}

impl TextBuffer {
    /// 空のバッファを作成
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            dirty: false,
        }
    }

    /// 行の列からバッファを作成（未変更状態）
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut buffer = Self::new();
        buffer.load_from_lines(lines);
        buffer
    }

    /// 行数
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// 行長（最終行の次の仮想行は 0）
    pub fn row_len(&self, index: usize) -> usize {
        self.rows.get(index).map_or(0, Row::len)
    }

    /// 最後の保存・読み込み以降に変更があるか
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// 保存成功時に変更フラグを下ろす
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// 末尾に行を追加
    pub fn append_row(&mut self, bytes: &[u8]) {
        self.rows.push(Row::from_bytes(bytes));
        self.dirty = true;
    }

    /// `(cy, cx)` にバイトを挿入する
    ///
    /// `cy == 行数` の場合は先に空行を追加する（文書末尾での入力）
    pub fn insert_char(&mut self, cy: usize, cx: usize, byte: u8) {
        if cy >= self.rows.len() {
            self.rows.push(Row::new());
        }
        let index = cy.min(self.rows.len() - 1);
        self.rows[index].insert(cx, byte);
        self.dirty = true;
    }

    /// カーソルの直前のバイトを削除する（バックスペース）
    ///
    /// 行頭では前の行と結合する。戻り値は新しいカーソル位置で、
    /// 何も起きなかった場合は `None`
    pub fn delete_char(&mut self, cy: usize, cx: usize) -> Option<Cursor> {
        if cy >= self.rows.len() {
            return None;
        }
        if cx == 0 && cy == 0 {
            return None;
        }

        if cx > 0 {
            self.rows[cy].remove(cx - 1)?;
            self.dirty = true;
            return Some(Cursor::at(cx - 1, cy));
        }

        let removed = self.rows.remove(cy);
        let previous = &mut self.rows[cy - 1];
        let joined_at = previous.len();
        previous.append(removed.as_bytes());
        self.dirty = true;
        Some(Cursor::at(joined_at, cy - 1))
    }

    /// Enter キー：`(cy, cx)` で行を分割する
    ///
    /// `cx == 0` では現在行の前に空行が入る形になる。新しいカーソルは `(cy + 1, 0)`
    pub fn split_row(&mut self, cy: usize, cx: usize) -> Cursor {
        if cy >= self.rows.len() {
            self.rows.push(Row::new());
        } else {
            let remainder = self.rows[cy].split_off(cx);
            self.rows.insert(cy + 1, remainder);
        }
        self.dirty = true;
        Cursor::at(0, cy + 1)
    }

    /// 保存時のバイト数（各行 + 改行1バイト）
    pub fn total_serialized_length(&self) -> usize {
        self.rows.iter().map(|row| row.len() + 1).sum()
    }

    /// 全行を改行区切りで連結する
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_serialized_length());
        for row in &self.rows {
            out.extend_from_slice(row.as_bytes());
            out.push(b'\n');
        }
        out
    }

    /// バッファ全体を置き換える（行末の `\r` / `\n` は取り除く）
    pub fn load_from_lines<I, L>(&mut self, lines: I)
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        self.rows = lines
            .into_iter()
            .map(|line| Row::from_bytes(strip_line_terminator(line.as_ref())))
            .collect();
        self.dirty = false;
    }
}

/// 行末の改行コードを取り除く
pub fn strip_line_terminator(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    while end > 0 && matches!(line[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    &line[..end]
}
