//! mini-nano - 端末上で動く小さなテキストエディタ
//!
//! バッファ、入力デコード、描画、プロンプトを組み合わせたモジュール構成

// コアモジュール
pub mod app;
pub mod config;
pub mod error;
pub mod frontend;
pub mod logging;
pub mod terminal;

// データ層
pub mod buffer;
pub mod file;

// ロジック層
pub mod input;
pub mod minibuffer;

// 表示層
pub mod ui;

// 公開API
pub use app::{App, EditorMode, PromptPurpose};
pub use config::EditorConfig;
pub use error::{NanoError, Result};
pub use frontend::TuiApplication;
