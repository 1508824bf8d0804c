//! 入力処理モジュール
//!
//! バイト列のデコード、キー定義、キーバインドを提供

pub mod decoder;
pub mod key;
pub mod keybinding;

// 公開API
pub use decoder::{DecodeState, InputDecoder};
pub use key::{ctrl_key, Key};
pub use keybinding::{Action, KeyMap};
