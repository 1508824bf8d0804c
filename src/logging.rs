//! ロギングシステム
//!
//! `log` ファサードの実装。raw モード中は端末に書けないため、出力先はファイルのみ

use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// ログファイルを指定する環境変数
pub const LOG_FILE_ENV: &str = "MINI_NANO_LOG";
/// ログレベルを指定する環境変数
pub const LOG_LEVEL_ENV: &str = "MINI_NANO_LOG_LEVEL";

/// ファイル出力ロガー
#[derive(Debug)]
pub struct Logger {
    level: LevelFilter,
    output_file: PathBuf,
    file: Mutex<Option<File>>,
}

impl Logger {
    /// 指定ファイルへ追記するロガーを作成
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            level: LevelFilter::Info,
            output_file: path.into(),
            file: Mutex::new(None),
        }
    }

    /// ログレベルを変更
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// ログレベルを取得
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    fn format_line(record: &Record<'_>) -> String {
        format!("{:<5} {}: {}", record.level(), record.target(), record.args())
    }

    fn write_line(&self, line: &str) {
        let Ok(mut guard) = self.file.lock() else {
            return;
        };

        if guard.is_none() {
            *guard = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.output_file)
                .ok();
        }

        if let Some(file) = guard.as_mut() {
            let _ = writeln!(file, "{}", line);
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            self.write_line(&Self::format_line(record));
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

/// ログレベル文字列を解釈（不明な値は `info`）
pub fn parse_level(value: &str) -> LevelFilter {
    value.trim().parse().unwrap_or(LevelFilter::Info)
}

/// グローバルロガーを設定する
///
/// 環境変数が設定ファイルより優先される。出力先がなければ何もしない
pub fn init(config_file: Option<&Path>, config_level: &str) -> bool {
    let path = std::env::var_os(LOG_FILE_ENV)
        .map(PathBuf::from)
        .or_else(|| config_file.map(Path::to_path_buf));

    let Some(path) = path else {
        return false;
    };

    let level = std::env::var(LOG_LEVEL_ENV)
        .map(|value| parse_level(&value))
        .unwrap_or_else(|_| parse_level(config_level));

    let logger = Logger::new(path).with_level(level);
    if log::set_boxed_logger(Box::new(logger)).is_err() {
        return false;
    }
    log::set_max_level(level);
    true
}
