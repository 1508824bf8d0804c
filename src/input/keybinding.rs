//! キーバインドシステム
//!
//! 通常モードでのキーとエディタアクションの対応

use super::key::{ctrl_key, Key};
use crate::buffer::Direction;
use std::collections::HashMap;

/// 通常モードで実行されるアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// カーソル移動
    Move(Direction),
    /// 文字挿入
    InsertChar(u8),
    /// 改行
    InsertNewline,
    /// カーソル直前の文字を削除
    DeleteBackward,
    /// 保存（ファイル名が無ければ入力を求める）
    Save,
    /// ファイルを開く
    Open,
    /// 終了（未保存なら確認）
    Exit,
    /// 何もしない
    None,
}

/// 制御コードとアクションの対応表
#[derive(Debug, Clone)]
pub struct KeyMap {
    control_bindings: HashMap<u8, Action>,
}

impl KeyMap {
    /// 既定のキーマップを作成
    pub fn new() -> Self {
        let mut control_bindings = HashMap::new();
        control_bindings.insert(ctrl_key(b's'), Action::Save);
        control_bindings.insert(ctrl_key(b'o'), Action::Open);
        control_bindings.insert(ctrl_key(b'x'), Action::Exit);
        // C-q は予約（何もしない）
        control_bindings.insert(ctrl_key(b'q'), Action::None);
        Self { control_bindings }
    }

    /// キーに対応するアクションを解決
    pub fn lookup(&self, key: Key) -> Action {
        match key {
            Key::Arrow(direction) => Action::Move(direction),
            Key::Printable(byte) => Action::InsertChar(byte),
            Key::Enter => Action::InsertNewline,
            Key::Backspace | Key::Delete => Action::DeleteBackward,
            Key::Control(code) => self
                .control_bindings
                .get(&code)
                .copied()
                .unwrap_or(Action::None),
            Key::Escape | Key::Raw(_) => Action::None,
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}
