//! エラーハンドリングシステム
//!
//! mini-nano 全体で使用される統一されたエラー型とユーティリティを定義
//! 致命的エラー（端末初期化失敗）は即座に終了、ファイル操作エラーはステータス表示で継続

use std::io;
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum NanoError {
    /// ファイル操作エラー
    #[error(transparent)]
    File(#[from] FileError),

    /// UI・端末操作エラー
    #[error(transparent)]
    Ui(#[from] UiError),

    /// 設定エラー
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// アプリケーション論理エラー
    #[error("Application error: {0}")]
    Application(String),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("No such file: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("{message}")]
    Io { message: String },
}

/// UI・端末操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum UiError {
    #[error("Terminal initialization failed: {reason}")]
    TerminalInit { reason: String },

    #[error("Screen size too small: {width}x{height}")]
    ScreenTooSmall { width: u16, height: u16 },

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid configuration file {path}: {reason}")]
    InvalidFile { path: String, reason: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

impl NanoError {
    /// 端末初期化など、続行不能なエラーかどうか
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            NanoError::Ui(UiError::TerminalInit { .. }) | NanoError::Ui(UiError::ScreenTooSmall { .. })
        )
    }

    /// 端末操作の失敗をUIエラーに変換
    pub fn terminal(context: &str, err: impl std::fmt::Display) -> Self {
        NanoError::Ui(UiError::RenderingFailed {
            component: format!("{}: {}", context, err),
        })
    }
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, NanoError>;

impl FileError {
    /// パス情報付きでI/Oエラーを分類
    pub fn from_io(path: &str, error: &io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FileError::NotFound {
                path: path.to_string(),
            },
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied {
                path: path.to_string(),
            },
            _ => FileError::Io {
                message: error.to_string(),
            },
        }
    }
}

// std::io::Error から NanoError への変換
impl From<io::Error> for NanoError {
    fn from(error: io::Error) -> Self {
        NanoError::File(FileError::Io {
            message: error.to_string(),
        })
    }
}

/// 画面を消去してカーソルを原点に戻し、raw モードを解除する
///
/// パニック時や致命的エラー時に、どの状態からでも呼び出せる
pub fn restore_terminal() {
    use std::io::Write;

    let mut out = io::stdout();
    let _ = out.write_all(crate::terminal::CLEAR_AND_HOME);
    let _ = out.flush();
    let _ = crossterm::terminal::disable_raw_mode();
}

/// 致命的エラー処理
pub fn handle_fatal_error(error: &NanoError, context: &str) -> ! {
    restore_terminal();
    log::error!("fatal error in {}: {:?}", context, error);
    eprintln!("mini-nano: {}: {}", context, error);
    std::process::exit(1);
}

/// パニックハンドラの設定
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        restore_terminal();

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        log::error!("panic at {}: {}", location, message);
        eprintln!("PANIC at {}: {}", location, message);
        eprintln!("Stack trace: {}", std::backtrace::Backtrace::capture());

        std::process::exit(1);
    }));
}
