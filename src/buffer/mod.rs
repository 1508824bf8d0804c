//! バッファ管理モジュール
//!
//! 行単位のテキストデータ、編集操作、カーソル位置管理を提供

pub mod cursor;
pub mod row;
pub mod text_buffer;

// 公開API
pub use cursor::{Cursor, Direction};
pub use row::Row;
pub use text_buffer::TextBuffer;
