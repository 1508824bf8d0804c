//! 端末アクセス
//!
//! raw モードの獲得と解除、タイムアウト付き1バイト読み取り、出力、画面サイズ取得

use crate::error::{NanoError, Result, UiError};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// 画面消去 + カーソルを原点へ
pub const CLEAR_AND_HOME: &[u8] = b"\x1b[2J\x1b[H";

/// エディタが必要とする端末機能
pub trait Terminal {
    /// 最大 `timeout` 待って1バイト読む。時間切れは `Ok(None)`
    fn read_byte(&mut self, timeout: Duration) -> Result<Option<u8>>;

    /// バイト列をそのまま書き出してフラッシュする
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// 端末の `(行数, 列数)`
    fn size(&self) -> Result<(u16, u16)>;
}

/// raw モードのスコープ。破棄時に元の端末設定へ戻す
#[derive(Debug)]
pub struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    pub fn acquire() -> Result<Self> {
        enable_raw_mode().map_err(|err| {
            NanoError::Ui(UiError::TerminalInit {
                reason: format!("enable raw mode: {}", err),
            })
        })?;
        log::debug!("raw mode enabled");
        Ok(Self { active: true })
    }

    /// 明示的に解除する（二重解除はしない）
    pub fn release(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            disable_raw_mode().map_err(|err| NanoError::terminal("disable raw mode", err))?;
            log::debug!("raw mode restored");
        }
        Ok(())
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            log::warn!("failed to restore terminal: {}", err);
        }
    }
}

/// crossterm による実端末
///
/// 標準入力はブロッキングで読まれるため、専用スレッドがバイトをチャネルへ流し、
/// `recv_timeout` で有界待ちを実現する
pub struct CrosstermTerminal {
    input: Receiver<io::Result<u8>>,
    out: io::Stdout,
    raw_mode: RawModeGuard,
}

impl CrosstermTerminal {
    /// raw モードに入り、入力スレッドを起動する
    pub fn open() -> Result<Self> {
        let raw_mode = RawModeGuard::acquire()?;
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("stdin-reader".to_string())
            .spawn(move || {
                let stdin = io::stdin();
                for byte in stdin.lock().bytes() {
                    if tx.send(byte).is_err() {
                        break;
                    }
                }
            })
            .map_err(|err| {
                NanoError::Ui(UiError::TerminalInit {
                    reason: format!("spawn input reader: {}", err),
                })
            })?;

        Ok(Self {
            input: rx,
            out: io::stdout(),
            raw_mode,
        })
    }

    /// raw モードを解除する（Drop でも解除される）
    pub fn restore(&mut self) -> Result<()> {
        self.raw_mode.release()
    }
}

impl Terminal for CrosstermTerminal {
    fn read_byte(&mut self, timeout: Duration) -> Result<Option<u8>> {
        match self.input.recv_timeout(timeout) {
            Ok(Ok(byte)) => Ok(Some(byte)),
            Ok(Err(err)) if err.kind() == io::ErrorKind::Interrupted => Ok(None),
            Ok(Err(err)) => Err(NanoError::terminal("read", err)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(NanoError::terminal("read", "input closed")),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let mut lock = self.out.lock();
        lock.write_all(bytes)
            .and_then(|_| lock.flush())
            .map_err(|err| NanoError::terminal("write", err))
    }

    fn size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = crossterm::terminal::size().map_err(|err| {
            NanoError::Ui(UiError::TerminalInit {
                reason: format!("query window size: {}", err),
            })
        })?;
        if cols == 0 {
            return Err(NanoError::Ui(UiError::TerminalInit {
                reason: "window size reported zero columns".to_string(),
            }));
        }
        Ok((rows, cols))
    }
}
