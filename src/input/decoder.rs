//! 入力デコーダ
//!
//! raw 端末のバイト列を論理キーへ変換する有限状態機械。
//! 後続バイトが1回の待ち時間内に届かなければシーケンスを破棄して ESC を返す

use super::key::{Key, ESCAPE};
use crate::buffer::Direction;
use crate::error::Result;
use crate::terminal::Terminal;
use std::time::Duration;

/// デコード状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeState {
    #[default]
    Idle,
    /// ESC を受信済み
    Escape,
    /// `ESC [` を受信済み
    Csi,
    /// `ESC [ <digit>` を受信済み
    CsiDigit(u8),
}

/// エスケープシーケンスを解決する入力デコーダ
#[derive(Debug, Clone, Default)]
pub struct InputDecoder {
    state: DecodeState,
}

impl InputDecoder {
    pub fn new() -> Self {
        Self {
            state: DecodeState::Idle,
        }
    }

    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// シーケンスの途中かどうか
    pub fn is_pending(&self) -> bool {
        self.state != DecodeState::Idle
    }

    /// 1バイトを入力し、キーが確定したら返す
    pub fn feed(&mut self, byte: u8) -> Option<Key> {
        let (next, key) = match (self.state, byte) {
            (DecodeState::Idle, ESCAPE) => (DecodeState::Escape, None),
            (DecodeState::Idle, _) => (DecodeState::Idle, Some(Key::from_byte(byte))),

            (DecodeState::Escape, b'[') => (DecodeState::Csi, None),
            // 新しい ESC は次のシーケンスの開始
            (DecodeState::Escape, ESCAPE) => (DecodeState::Escape, Some(Key::Escape)),
            (DecodeState::Escape, _) => (DecodeState::Idle, Some(Key::Escape)),

            (DecodeState::Csi, b'0'..=b'9') => (DecodeState::CsiDigit(byte), None),
            (DecodeState::Csi, b'A') => (DecodeState::Idle, Some(Key::Arrow(Direction::Up))),
            (DecodeState::Csi, b'B') => (DecodeState::Idle, Some(Key::Arrow(Direction::Down))),
            (DecodeState::Csi, b'C') => (DecodeState::Idle, Some(Key::Arrow(Direction::Right))),
            (DecodeState::Csi, b'D') => (DecodeState::Idle, Some(Key::Arrow(Direction::Left))),
            (DecodeState::Csi, _) => (DecodeState::Idle, Some(Key::Escape)),

            (DecodeState::CsiDigit(b'3'), b'~') => (DecodeState::Idle, Some(Key::Delete)),
            (DecodeState::CsiDigit(_), _) => (DecodeState::Idle, Some(Key::Escape)),
        };

        self.state = next;
        key
    }

    /// 待ち時間切れ。シーケンス途中なら破棄して ESC を返す
    pub fn timeout(&mut self) -> Option<Key> {
        if self.is_pending() {
            log::debug!("escape sequence abandoned in state {:?}", self.state);
            self.state = DecodeState::Idle;
            Some(Key::Escape)
        } else {
            None
        }
    }

    /// 端末から1キー分を読み取る
    ///
    /// 何も入力が無ければ `Ok(None)`（呼び出し側は再描画して再試行する）
    pub fn read_key<T: Terminal + ?Sized>(
        &mut self,
        terminal: &mut T,
        timeout: Duration,
    ) -> Result<Option<Key>> {
        loop {
            match terminal.read_byte(timeout)? {
                Some(byte) => {
                    if let Some(key) = self.feed(byte) {
                        return Ok(Some(key));
                    }
                }
                None => return Ok(self.timeout()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Vec<Key> {
        let mut decoder = InputDecoder::new();
        let mut keys: Vec<Key> = bytes.iter().filter_map(|&b| decoder.feed(b)).collect();
        keys.extend(decoder.timeout());
        keys
    }

    #[test]
    fn test_plain_bytes_pass_through() {
        assert_eq!(
            decode_all(b"a\r\x7f"),
            vec![Key::Printable(b'a'), Key::Enter, Key::Backspace]
        );
    }

    #[test]
    fn test_arrow_sequences() {
        assert_eq!(
            decode_all(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![
                Key::Arrow(Direction::Up),
                Key::Arrow(Direction::Down),
                Key::Arrow(Direction::Right),
                Key::Arrow(Direction::Left),
            ]
        );
    }

    #[test]
    fn test_delete_sequence() {
        assert_eq!(decode_all(b"\x1b[3~"), vec![Key::Delete]);
    }

    #[test]
    fn test_unknown_sequences_become_escape() {
        assert_eq!(decode_all(b"\x1b[5~"), vec![Key::Escape]);
        assert_eq!(decode_all(b"\x1b[Z"), vec![Key::Escape]);
        assert_eq!(decode_all(b"\x1bOx"), vec![Key::Escape, Key::Printable(b'x')]);
    }

    #[test]
    fn test_timeout_abandons_partial_sequence() {
        let mut decoder = InputDecoder::new();
        assert_eq!(decoder.feed(0x1b), None);
        assert_eq!(decoder.feed(b'['), None);
        assert_eq!(decoder.state(), DecodeState::Csi);

        assert_eq!(decoder.timeout(), Some(Key::Escape));
        assert_eq!(decoder.state(), DecodeState::Idle);
        assert_eq!(decoder.timeout(), None);
    }

    #[test]
    fn test_escape_followed_by_arrow_sequence() {
        assert_eq!(
            decode_all(b"\x1b\x1b[A"),
            vec![Key::Escape, Key::Arrow(Direction::Up)]
        );
        assert_eq!(decode_all(b"\x1b\x1b"), vec![Key::Escape, Key::Escape]);
    }

    #[test]
    fn test_decoder_recovers_after_abandon() {
        let mut decoder = InputDecoder::new();
        decoder.feed(0x1b);
        decoder.timeout();
        assert_eq!(decoder.feed(b'q'), Some(Key::Printable(b'q')));
    }
}
