//! ファイル操作
//!
//! 行単位の読み込みとアトミック保存、パス展開

pub mod io;
pub mod path;

pub use io::{split_lines, FilePersistence, MemoryPersistence, Persistence};
pub use path::expand_path;
