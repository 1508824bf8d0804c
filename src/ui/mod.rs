//! UIモジュール
//!
//! ビューポート計算、フレーム描画、ステータスメッセージ

pub mod renderer;
pub mod status;
pub mod viewport;

// 公開API
pub use renderer::{FrameView, PromptLine, ScreenRenderer, StatusLineInfo};
pub use status::StatusMessage;
pub use viewport::Viewport;
