//! 画面描画
//!
//! 1回のリフレッシュごとにフレーム全体を1つのバイト列として組み立てる。
//! 差分描画はせず、毎回すべての行を描き直す

use crate::buffer::{Cursor, TextBuffer};
use crate::ui::viewport::Viewport;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};

/// 空バッファ時に表示するバナー
pub const WELCOME_MESSAGE: &str = "mini-nano -- simple editor";
/// ファイル名が無い場合の表示
pub const NO_NAME: &str = "[No Name]";
/// ステータス行に表示するファイル名の最大バイト数
const MAX_FILENAME_WIDTH: usize = 20;

/// ステータス行に表示する情報
#[derive(Debug, Clone, Copy)]
pub struct StatusLineInfo<'a> {
    pub file_label: Option<&'a str>,
    pub is_modified: bool,
}

/// 1フレームの描画に必要な状態
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub buffer: &'a TextBuffer,
    pub viewport: &'a Viewport,
    pub cursor: Cursor,
    pub status: StatusLineInfo<'a>,
    /// 表示期間内のメッセージ
    pub message: Option<&'a str>,
    /// 入力中のプロンプト。メッセージより優先される
    pub prompt: Option<PromptLine<'a>>,
}

/// メッセージ行に表示するプロンプト
#[derive(Debug, Clone, Copy)]
pub struct PromptLine<'a> {
    /// ラベル + 入力
    pub text: &'a str,
    /// メッセージ行でのカーソル列
    pub cursor: usize,
}

/// フレーム全体を組み立てるレンダラー
#[derive(Debug, Clone, Default)]
pub struct ScreenRenderer;

impl ScreenRenderer {
    pub fn new() -> Self {
        Self
    }

    /// フレームを描画してバイト列を返す
    pub fn render(&self, frame: &FrameView<'_>) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();

        queue!(out, Hide, MoveTo(0, 0))?;
        self.draw_rows(&mut out, frame)?;
        self.draw_status_bar(&mut out, frame)?;
        self.draw_message_bar(&mut out, frame)?;

        let (row, col) = match frame.prompt {
            Some(prompt) => (
                frame.viewport.screenrows + 1,
                prompt.cursor.min(frame.viewport.screencols.saturating_sub(1)),
            ),
            None => frame.viewport.screen_position(frame.cursor),
        };
        queue!(out, MoveTo(to_u16(col), to_u16(row)), Show)?;

        Ok(out)
    }

    fn draw_rows(&self, out: &mut Vec<u8>, frame: &FrameView<'_>) -> io::Result<()> {
        let viewport = frame.viewport;
        let buffer = frame.buffer;

        for y in 0..viewport.screenrows {
            let filerow = y + viewport.rowoff;
            match buffer.row(filerow) {
                Some(row) => {
                    out.write_all(row.visible_slice(viewport.coloff, viewport.screencols))?;
                }
                None if buffer.is_empty() && y == viewport.screenrows / 3 => {
                    self.draw_welcome(out, viewport.screencols)?;
                }
                None => out.write_all(b"~")?,
            }
            queue!(out, Clear(ClearType::UntilNewLine), Print("\r\n"))?;
        }
        Ok(())
    }

    fn draw_welcome(&self, out: &mut Vec<u8>, screencols: usize) -> io::Result<()> {
        let welcome = WELCOME_MESSAGE.as_bytes();
        let len = welcome.len().min(screencols);
        let mut padding = (screencols - len) / 2;
        if padding > 0 {
            out.write_all(b"~")?;
            padding -= 1;
        }
        out.extend(std::iter::repeat(b' ').take(padding));
        out.write_all(&welcome[..len])
    }

    fn draw_status_bar(&self, out: &mut Vec<u8>, frame: &FrameView<'_>) -> io::Result<()> {
        let cols = frame.viewport.screencols;
        let (left, right) = status_texts(&frame.status, frame.buffer.num_rows());

        queue!(out, SetAttribute(Attribute::Reverse))?;
        let mut len = left.len().min(cols);
        out.write_all(&left[..len])?;
        while len < cols {
            if cols - len == right.len() {
                out.write_all(&right)?;
                break;
            }
            out.push(b' ');
            len += 1;
        }
        queue!(out, SetAttribute(Attribute::Reset), Print("\r\n"))?;
        Ok(())
    }

    fn draw_message_bar(&self, out: &mut Vec<u8>, frame: &FrameView<'_>) -> io::Result<()> {
        queue!(out, Clear(ClearType::UntilNewLine))?;
        let text = frame
            .prompt
            .map(|prompt| prompt.text)
            .or(frame.message)
            .unwrap_or("");
        let bytes = text.as_bytes();
        out.write_all(&bytes[..bytes.len().min(frame.viewport.screencols)])
    }
}

/// ステータス行の左右の文字列を作る
pub fn status_texts(status: &StatusLineInfo<'_>, num_rows: usize) -> (Vec<u8>, Vec<u8>) {
    let name = status.file_label.unwrap_or(NO_NAME).as_bytes();
    let mut left = name[..name.len().min(MAX_FILENAME_WIDTH)].to_vec();
    left.push(b' ');
    if status.is_modified {
        left.extend_from_slice(b" (modified)");
    }
    let right = format!("{} lines", num_rows).into_bytes();
    (left, right)
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
