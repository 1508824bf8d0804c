//! ビューポート管理
//!
//! 画面に表示するテキスト領域のスクロール位置を管理する。
//! スクロールはジャンプのみで、アニメーションはしない

use crate::buffer::Cursor;

/// 表示領域の左上オフセットと画面寸法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// 表示開始行
    pub rowoff: usize,
    /// 表示開始列
    pub coloff: usize,
    /// 編集領域の行数
    pub screenrows: usize,
    /// 画面の列数
    pub screencols: usize,
}

impl Viewport {
    pub fn new(screenrows: usize, screencols: usize) -> Self {
        Self {
            rowoff: 0,
            coloff: 0,
            screenrows: screenrows.max(1),
            screencols: screencols.max(1),
        }
    }

    /// 原点へ戻す
    pub fn reset(&mut self) {
        self.rowoff = 0;
        self.coloff = 0;
    }

    /// カーソルが表示範囲に入るようスクロールする
    ///
    /// 戻り値はスクロールが発生したかどうか
    pub fn scroll(&mut self, cursor: Cursor) -> bool {
        let before = (self.rowoff, self.coloff);

        if cursor.cy < self.rowoff {
            self.rowoff = cursor.cy;
        }
        if cursor.cy >= self.rowoff + self.screenrows {
            self.rowoff = cursor.cy + 1 - self.screenrows;
        }
        if cursor.cx < self.coloff {
            self.coloff = cursor.cx;
        }
        if cursor.cx >= self.coloff + self.screencols {
            self.coloff = cursor.cx + 1 - self.screencols;
        }

        before != (self.rowoff, self.coloff)
    }

    /// カーソルが表示範囲内か
    pub fn contains(&self, cursor: Cursor) -> bool {
        (self.rowoff..self.rowoff + self.screenrows).contains(&cursor.cy)
            && (self.coloff..self.coloff + self.screencols).contains(&cursor.cx)
    }

    /// 画面上のカーソル位置 `(行, 列)`（0 始まり）
    pub fn screen_position(&self, cursor: Cursor) -> (usize, usize) {
        (
            cursor.cy.saturating_sub(self.rowoff),
            cursor.cx.saturating_sub(self.coloff),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
