//! プロンプト管理
//!
//! ファイル名や確認の入力を受け付ける1行プロンプト。
//! アクティブな間はすべてのキーをこのプロンプトが処理する

use crate::input::Key;

/// プロンプトの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// 入力が確定した
    Completed(String),
    /// 入力がキャンセルされた
    Cancelled,
    /// 入力継続中
    InProgress,
}

/// 1行入力のプロンプト
#[derive(Debug, Clone, Default)]
pub struct PromptController {
    /// ラベル（"Save as: " など）
    label: String,
    /// 現在の入力内容
    input: String,
    active: bool,
}

impl PromptController {
    pub fn new() -> Self {
        Self::default()
    }

    /// プロンプトを開始（前回の入力は破棄）
    pub fn start<S: Into<String>>(&mut self, label: S) {
        self.label = label.into();
        self.input.clear();
        self.active = true;
        log::debug!("prompt started: {:?}", self.label);
    }

    /// プロンプトを終了
    pub fn end(&mut self) {
        self.active = false;
        self.label.clear();
        self.input.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// キーを1つ処理する
    pub fn handle_key(&mut self, key: Key) -> PromptResult {
        if !self.active {
            return PromptResult::Cancelled;
        }

        match key {
            Key::Printable(byte) => {
                self.input.push(char::from(byte));
                PromptResult::InProgress
            }
            Key::Backspace | Key::Delete => {
                self.input.pop();
                PromptResult::InProgress
            }
            Key::Enter => {
                if self.input.is_empty() {
                    self.cancel()
                } else {
                    let input = std::mem::take(&mut self.input);
                    self.end();
                    PromptResult::Completed(input)
                }
            }
            Key::Escape => self.cancel(),
            Key::Control(_) | Key::Arrow(_) | Key::Raw(_) => PromptResult::InProgress,
        }
    }

    /// 入力を破棄してキャンセル
    pub fn cancel(&mut self) -> PromptResult {
        self.end();
        PromptResult::Cancelled
    }

    /// メッセージ行に表示する文字列
    pub fn display_string(&self) -> String {
        format!("{}{}", self.label, self.input)
    }

    /// メッセージ行でのカーソル位置（ラベル長 + 入力長）
    pub fn cursor_position(&self) -> usize {
        self.label.len() + self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Direction;

    fn type_str(prompt: &mut PromptController, text: &str) {
        for byte in text.bytes() {
            assert_eq!(prompt.handle_key(Key::Printable(byte)), PromptResult::InProgress);
        }
    }

    #[test]
    fn test_prompt_creation() {
        let prompt = PromptController::new();
        assert!(!prompt.is_active());
        assert_eq!(prompt.label(), "");
        assert_eq!(prompt.input(), "");
    }

    #[test]
    fn test_input_manipulation() {
        let mut prompt = PromptController::new();
        prompt.start("Save as: ");
        type_str(&mut prompt, "ab");
        assert_eq!(prompt.input(), "ab");

        prompt.handle_key(Key::Backspace);
        assert_eq!(prompt.input(), "a");

        assert_eq!(
            prompt.handle_key(Key::Enter),
            PromptResult::Completed("a".to_string())
        );
        assert!(!prompt.is_active());
    }

    #[test]
    fn test_backspace_on_empty_input_is_noop() {
        let mut prompt = PromptController::new();
        prompt.start("Open file: ");
        assert_eq!(prompt.handle_key(Key::Backspace), PromptResult::InProgress);
        assert!(prompt.is_active());
        assert_eq!(prompt.input(), "");
    }

    #[test]
    fn test_enter_on_empty_input_cancels() {
        let mut prompt = PromptController::new();
        prompt.start("Save as: ");
        assert_eq!(prompt.handle_key(Key::Enter), PromptResult::Cancelled);
        assert!(!prompt.is_active());
    }

    #[test]
    fn test_escape_discards_partial_input() {
        let mut prompt = PromptController::new();
        prompt.start("Save as: ");
        type_str(&mut prompt, "out.txt");
        assert_eq!(prompt.handle_key(Key::Escape), PromptResult::Cancelled);
        assert_eq!(prompt.input(), "");

        prompt.start("Save as: ");
        assert_eq!(prompt.input(), "");
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut prompt = PromptController::new();
        prompt.start("Open file: ");
        type_str(&mut prompt, "x");
        assert_eq!(
            prompt.handle_key(Key::Arrow(Direction::Left)),
            PromptResult::InProgress
        );
        assert_eq!(prompt.handle_key(Key::Control(0x13)), PromptResult::InProgress);
        assert_eq!(prompt.handle_key(Key::Raw(0xe3)), PromptResult::InProgress);
        assert_eq!(prompt.input(), "x");
    }

    #[test]
    fn test_display_string() {
        let mut prompt = PromptController::new();
        prompt.start("Save as: ");
        type_str(&mut prompt, "te");

        assert_eq!(prompt.display_string(), "Save as: te");
        assert_eq!(prompt.cursor_position(), 11);
    }
}
