//! 統合テスト用の端末とヘルパー

#![allow(dead_code)]

use mini_nano::error::{NanoError, Result};
use mini_nano::file::{MemoryPersistence, Persistence};
use mini_nano::input::Key;
use mini_nano::terminal::Terminal;
use mini_nano::{App, EditorConfig};
use std::collections::VecDeque;
use std::time::Duration;

/// 入力を台本通りに返す端末
///
/// `None` は1回分の待ち時間切れを表す。台本が尽きたら読み取りエラー
pub struct ScriptedTerminal {
    input: VecDeque<Option<u8>>,
    pub output: Vec<u8>,
    rows: u16,
    cols: u16,
}

impl ScriptedTerminal {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            input: VecDeque::new(),
            output: Vec::new(),
            rows,
            cols,
        }
    }

    /// バイト列を入力に追加
    pub fn push_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.input.extend(bytes.iter().copied().map(Some));
        self
    }

    /// 待ち時間切れを1回追加
    pub fn push_timeout(&mut self) -> &mut Self {
        self.input.push_back(None);
        self
    }

    pub fn remaining(&self) -> usize {
        self.input.len()
    }

    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Terminal for ScriptedTerminal {
    fn read_byte(&mut self, _timeout: Duration) -> Result<Option<u8>> {
        self.input
            .pop_front()
            .ok_or_else(|| NanoError::terminal("read", "script exhausted"))
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok((self.rows, self.cols))
    }
}

pub fn new_app(persistence: MemoryPersistence) -> App<MemoryPersistence> {
    App::new(persistence, &EditorConfig::default(), 20, 80)
}

pub fn type_str<P: Persistence>(app: &mut App<P>, text: &str) {
    for byte in text.bytes() {
        app.process_key(Key::Printable(byte));
    }
}

pub fn rows<P: Persistence>(app: &App<P>) -> Vec<String> {
    app.buffer()
        .rows()
        .iter()
        .map(|row| String::from_utf8_lossy(row.as_bytes()).into_owned())
        .collect()
}
