use crate::app::App;
use crate::config::EditorConfig;
use crate::error::{NanoError, Result, UiError};
use crate::file::FilePersistence;
use crate::terminal::{CrosstermTerminal, Terminal};

/// ステータス行とメッセージ行に使う行数
const RESERVED_ROWS: u16 = 2;

pub struct TuiApplication {
    config: EditorConfig,
}

impl TuiApplication {
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    /// コマンドライン引数を解釈する（ファイル名は0個または1個）
    pub fn parse_args(args: &[String]) -> Result<Option<String>> {
        match args {
            [] => Ok(None),
            [name] => Ok(Some(name.clone())),
            _ => Err(NanoError::Application(
                "usage: mini-nano [file]".to_string(),
            )),
        }
    }

    /// 端末を raw モードにしてエディタを実行する
    ///
    /// 端末は戻り値に関わらず元の設定へ戻る
    pub fn run(&mut self, filename: Option<&str>) -> Result<()> {
        let mut terminal = CrosstermTerminal::open()?;
        let (rows, cols) = terminal.size()?;
        if rows <= RESERVED_ROWS {
            return Err(NanoError::Ui(UiError::ScreenTooSmall {
                width: cols,
                height: rows,
            }));
        }
        log::info!("terminal size {}x{}", cols, rows);

        let mut app = App::new(
            FilePersistence::new(),
            &self.config,
            usize::from(rows - RESERVED_ROWS),
            usize::from(cols),
        );
        if let Some(name) = filename {
            app.open_startup_file(name);
        }

        let loop_result = app.run(&mut terminal);
        let cleanup_result = terminal.restore();

        loop_result.and(cleanup_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args_accepts_zero_or_one_file() {
        assert_eq!(TuiApplication::parse_args(&[]).unwrap(), None);
        assert_eq!(
            TuiApplication::parse_args(&["notes.txt".to_string()]).unwrap(),
            Some("notes.txt".to_string())
        );
    }

    #[test]
    fn test_parse_args_rejects_extra_files() {
        let args = vec!["a.txt".to_string(), "b.txt".to_string()];
        let err = TuiApplication::parse_args(&args).unwrap_err();
        assert!(matches!(err, NanoError::Application(_)));
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "Application error: usage: mini-nano [file]");
    }
}
