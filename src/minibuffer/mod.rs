//! ミニバッファ
//!
//! メッセージ行で1行の文字列を受け取るプロンプト

pub mod prompt;

pub use prompt::{PromptController, PromptResult};
