//! カーソル位置管理
//!
//! 論理位置 `(cx, cy)` と、バッファ形状に合わせたクランプ規則

use super::text_buffer::TextBuffer;

/// カーソル移動の方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// カーソル位置
///
/// `cy` は `0..=行数`（行数そのものは最終行の次の仮想行）、
/// `cx` は `0..=行長` の範囲をとる
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// 列（バイト単位）
    pub cx: usize,
    /// 行
    pub cy: usize,
}

impl Cursor {
    /// 原点のカーソルを作成
    pub fn new() -> Self {
        Self { cx: 0, cy: 0 }
    }

    /// 指定位置のカーソルを作成
    pub fn at(cx: usize, cy: usize) -> Self {
        Self { cx, cy }
    }

    /// 原点に戻す
    pub fn move_to_origin(&mut self) {
        self.cx = 0;
        self.cy = 0;
    }

    /// バッファ形状に合わせて位置を補正する（冪等）
    pub fn clamp(&mut self, buffer: &TextBuffer) {
        self.cy = self.cy.min(buffer.num_rows());
        self.cx = self.cx.min(buffer.row_len(self.cy));
    }

    /// 方向に従って移動する。戻り値は位置が変わったかどうか
    pub fn move_in(&mut self, direction: Direction, buffer: &TextBuffer) -> bool {
        let before = *self;
        let num_rows = buffer.num_rows();

        match direction {
            Direction::Up => {
                self.cy = self.cy.saturating_sub(1);
                self.clamp(buffer);
            }
            Direction::Down => {
                self.cy = (self.cy + 1).min(num_rows);
                self.clamp(buffer);
            }
            Direction::Right => {
                if self.cx < buffer.row_len(self.cy) {
                    self.cx += 1;
                } else if self.cy < num_rows {
                    self.cy += 1;
                    self.cx = 0;
                }
            }
            Direction::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = buffer.row_len(self.cy);
                }
            }
        }

        *self != before
    }
}
