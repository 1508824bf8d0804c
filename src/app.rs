//! メインアプリケーション構造体
//!
//! 通常モードとプロンプトモードを持つエディタの状態機械と、
//! 読み取り・処理・描画のメインループを実装

use crate::buffer::{Cursor, TextBuffer};
use crate::config::EditorConfig;
use crate::error::{NanoError, Result};
use crate::file::{expand_path, Persistence};
use crate::input::{Action, InputDecoder, Key, KeyMap};
use crate::minibuffer::{PromptController, PromptResult};
use crate::terminal::{Terminal, CLEAR_AND_HOME};
use crate::ui::{FrameView, PromptLine, ScreenRenderer, StatusLineInfo, StatusMessage, Viewport};
use std::time::{Duration, Instant};

/// 起動時に表示するヘルプ
pub const HELP_MESSAGE: &str = "Ctrl-S: Save | Ctrl-O: Open | Ctrl-X: Exit";

const SAVE_AS_LABEL: &str = "Save as: ";
const OPEN_LABEL: &str = "Open file: ";
const CONFIRM_EXIT_LABEL: &str = "Save changes before exit? (y/N): ";

/// プロンプトの用途
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    /// 保存先の入力。`then_exit` なら保存成功後に終了する
    SaveAs { then_exit: bool },
    Open,
    /// 終了前の保存確認
    ConfirmExitSave,
}

/// エディタのモード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Normal,
    Prompting(PromptPurpose),
}

/// エディタ本体
pub struct App<P: Persistence> {
    running: bool,
    mode: EditorMode,
    buffer: TextBuffer,
    cursor: Cursor,
    viewport: Viewport,
    /// 入力されたままのファイル名
    filename: Option<String>,
    keymap: KeyMap,
    decoder: InputDecoder,
    prompt: PromptController,
    status: StatusMessage,
    renderer: ScreenRenderer,
    persistence: P,
    input_timeout: Duration,
}

impl<P: Persistence> App<P> {
    /// 編集領域の寸法を指定して作成
    pub fn new(persistence: P, config: &EditorConfig, screenrows: usize, screencols: usize) -> Self {
        let mut status = StatusMessage::new(config.message_ttl());
        status.set(HELP_MESSAGE);

        Self {
            running: true,
            mode: EditorMode::Normal,
            buffer: TextBuffer::new(),
            cursor: Cursor::new(),
            viewport: Viewport::new(screenrows, screencols),
            filename: None,
            keymap: KeyMap::new(),
            decoder: InputDecoder::new(),
            prompt: PromptController::new(),
            status,
            renderer: ScreenRenderer::new(),
            persistence,
            input_timeout: config.input_timeout(),
        }
    }

    /// 起動時に指定されたファイルを読み込む
    ///
    /// 読み込みに失敗してもファイル名は保持する（新規ファイルとして保存できる）
    pub fn open_startup_file(&mut self, name: &str) {
        self.filename = Some(name.to_string());
        match self.load_into_buffer(name) {
            Ok(()) => log::info!("opened {}", name),
            Err(err) => {
                log::warn!("startup file {} not loaded: {}", name, err);
                self.status.set(format!("Could not open: {}", err));
            }
        }
    }

    /// メインループ。終了時に画面を消去する
    pub fn run<T: Terminal + ?Sized>(&mut self, terminal: &mut T) -> Result<()> {
        while self.running {
            let frame = self.render_frame(Instant::now())?;
            terminal.write_all(&frame)?;

            if let Some(key) = self.decoder.read_key(terminal, self.input_timeout)? {
                self.process_key(key);
            }
        }

        terminal.write_all(CLEAR_AND_HOME)
    }

    /// キーを1つ処理する
    pub fn process_key(&mut self, key: Key) {
        match self.mode {
            EditorMode::Normal => {
                let action = self.keymap.lookup(key);
                log::debug!("key {:?} -> {:?}", key, action);
                self.handle_action(action);
            }
            EditorMode::Prompting(purpose) => match self.prompt.handle_key(key) {
                PromptResult::InProgress => {}
                result => {
                    self.mode = EditorMode::Normal;
                    log::debug!("prompt {:?} finished: {:?}", purpose, result);
                    self.resolve_prompt(purpose, result);
                }
            },
        }
        self.viewport.scroll(self.cursor);
    }

    /// 現在の状態からフレームを組み立てる
    pub fn render_frame(&mut self, now: Instant) -> Result<Vec<u8>> {
        self.viewport.scroll(self.cursor);

        let prompt_text = self.prompt.is_active().then(|| self.prompt.display_string());
        let prompt = prompt_text.as_deref().map(|text| PromptLine {
            text,
            cursor: self.prompt.cursor_position(),
        });
        let view = FrameView {
            buffer: &self.buffer,
            viewport: &self.viewport,
            cursor: self.cursor,
            status: StatusLineInfo {
                file_label: self.filename.as_deref(),
                is_modified: self.buffer.is_dirty(),
            },
            message: self.status.visible_text(now),
            prompt,
        };

        self.renderer
            .render(&view)
            .map_err(|err| NanoError::terminal("render", err))
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn prompt(&self) -> &PromptController {
        &self.prompt
    }

    /// 最後に設定されたステータスメッセージ
    pub fn status_text(&self) -> &str {
        self.status.text()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Move(direction) => {
                self.cursor.move_in(direction, &self.buffer);
            }
            Action::InsertChar(byte) => {
                self.buffer.insert_char(self.cursor.cy, self.cursor.cx, byte);
                self.cursor.cx += 1;
            }
            Action::InsertNewline => {
                self.cursor = self.buffer.split_row(self.cursor.cy, self.cursor.cx);
            }
            Action::DeleteBackward => {
                if let Some(cursor) = self.buffer.delete_char(self.cursor.cy, self.cursor.cx) {
                    self.cursor = cursor;
                }
            }
            Action::Save => self.save(false),
            Action::Open => self.start_prompt(PromptPurpose::Open),
            Action::Exit => {
                if self.buffer.is_dirty() {
                    self.start_prompt(PromptPurpose::ConfirmExitSave);
                } else {
                    self.terminate();
                }
            }
            Action::None => {}
        }
    }

    fn start_prompt(&mut self, purpose: PromptPurpose) {
        let label = match purpose {
            PromptPurpose::SaveAs { .. } => SAVE_AS_LABEL,
            PromptPurpose::Open => OPEN_LABEL,
            PromptPurpose::ConfirmExitSave => CONFIRM_EXIT_LABEL,
        };
        self.prompt.start(label);
        self.mode = EditorMode::Prompting(purpose);
    }

    fn resolve_prompt(&mut self, purpose: PromptPurpose, result: PromptResult) {
        match (purpose, result) {
            (PromptPurpose::SaveAs { then_exit }, PromptResult::Completed(name)) => {
                self.filename = Some(name);
                self.save_to_bound_file(then_exit);
            }
            (PromptPurpose::SaveAs { .. }, _) => {
                self.status.set("Save aborted");
            }
            (PromptPurpose::Open, PromptResult::Completed(name)) => self.open_file(&name),
            (PromptPurpose::Open, _) => {}
            (PromptPurpose::ConfirmExitSave, PromptResult::Completed(answer))
                if answer.starts_with(['y', 'Y']) =>
            {
                self.save(true);
            }
            (PromptPurpose::ConfirmExitSave, _) => self.terminate(),
        }
    }

    /// 保存。ファイル名が無ければ入力を求める
    fn save(&mut self, then_exit: bool) {
        if self.filename.is_some() {
            self.save_to_bound_file(then_exit);
        } else {
            self.start_prompt(PromptPurpose::SaveAs { then_exit });
        }
    }

    fn save_to_bound_file(&mut self, then_exit: bool) {
        let Some(name) = self.filename.clone() else {
            return;
        };

        let content = self.buffer.serialize();
        let result = expand_path(&name).and_then(|path| self.persistence.save(&path, &content));
        match result {
            Ok(()) => {
                self.buffer.mark_clean();
                log::info!("saved {} bytes to {}", content.len(), name);
                self.status.set(format!("Saved to {}", name));
                if then_exit {
                    self.terminate();
                }
            }
            Err(err) => {
                // 終了要求中でもエディタに留まる
                log::warn!("save to {} failed: {}", name, err);
                self.status.set(format!("Can't save: {}", err));
            }
        }
    }

    fn open_file(&mut self, name: &str) {
        match self.load_into_buffer(name) {
            Ok(()) => {
                self.filename = Some(name.to_string());
                log::info!("opened {}", name);
                self.status.set(format!("Opened {}", name));
            }
            Err(err) => {
                log::warn!("open {} failed: {}", name, err);
                self.status.set(format!("Could not open: {}", err));
            }
        }
    }

    /// 読み込みに成功した場合のみバッファを置き換える
    fn load_into_buffer(&mut self, name: &str) -> Result<()> {
        let path = expand_path(name)?;
        let lines = self.persistence.load(&path)?;

        self.buffer.load_from_lines(lines);
        self.cursor.move_to_origin();
        self.viewport.reset();
        Ok(())
    }

    fn terminate(&mut self) {
        log::debug!("terminating");
        self.running = false;
    }
}
