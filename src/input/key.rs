//! 論理キー
//!
//! 入力デコーダが出力するキーイベントのアルファベット

use crate::buffer::Direction;

/// Enter（raw モードでは CR）
pub const ENTER: u8 = b'\r';
/// Backspace / DEL
pub const BACKSPACE: u8 = 127;
/// C-h
pub const CTRL_H: u8 = 0x08;
/// ESC
pub const ESCAPE: u8 = 0x1b;

/// Ctrl と組み合わせた文字の制御コード
pub const fn ctrl_key(ch: u8) -> u8 {
    ch & 0x1f
}

/// デコード済みのキー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// 表示可能なASCII文字（0x20..=0x7E）
    Printable(u8),
    Enter,
    /// 127 または C-h
    Backspace,
    /// `ESC [ 3 ~`
    Delete,
    /// その他の制御コード
    Control(u8),
    Arrow(Direction),
    Escape,
    /// 0x80 以上のバイト
    Raw(u8),
}

impl Key {
    /// 単独のバイトを分類する（ESC は呼び出し側で扱う）
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            ENTER => Key::Enter,
            BACKSPACE | CTRL_H => Key::Backspace,
            ESCAPE => Key::Escape,
            0x20..=0x7e => Key::Printable(byte),
            0x00..=0x1f => Key::Control(byte),
            _ => Key::Raw(byte),
        }
    }

    /// 指定文字との Ctrl 組み合わせかどうか
    pub fn is_ctrl(&self, ch: u8) -> bool {
        matches!(self, Key::Control(code) if *code == ctrl_key(ch))
    }

    /// 挿入可能な文字を取り出す
    pub fn printable(&self) -> Option<u8> {
        match self {
            Key::Printable(byte) => Some(*byte),
            _ => None,
        }
    }
}
