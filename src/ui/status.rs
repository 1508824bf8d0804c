//! ステータスメッセージ
//!
//! 一定時間だけメッセージ行に表示される短い通知

use std::time::{Duration, Instant};

/// 時刻付きのステータスメッセージ
#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    set_at: Instant,
    ttl: Duration,
}

impl StatusMessage {
    /// 空のメッセージを作成
    pub fn new(ttl: Duration) -> Self {
        Self {
            text: String::new(),
            set_at: Instant::now(),
            ttl,
        }
    }

    /// メッセージを更新（表示時間をリセット）
    pub fn set<S: Into<String>>(&mut self, text: S) {
        self.text = text.into();
        self.set_at = Instant::now();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_at(&self) -> Instant {
        self.set_at
    }

    /// `now` の時点で表示すべきか
    pub fn is_visible(&self, now: Instant) -> bool {
        !self.text.is_empty() && now.saturating_duration_since(self.set_at) < self.ttl
    }

    /// `now` の時点で表示する文字列
    pub fn visible_text(&self, now: Instant) -> Option<&str> {
        self.is_visible(now).then_some(self.text.as_str())
    }
}
