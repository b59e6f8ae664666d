//! 処理中/待機中の状態と通知

use std::fmt;

/// 待機中のウィンドウタイトル
pub const IDLE_TITLE: &str = "Universal Info Extractor";

/// 処理中のウィンドウタイトル
pub const BUSY_TITLE: &str = "Extractor - Processing, please wait...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusyStatus {
    #[default]
    Idle,
    Busy,
}

impl BusyStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, BusyStatus::Busy)
    }

    pub fn title(&self) -> &'static str {
        match self {
            BusyStatus::Idle => IDLE_TITLE,
            BusyStatus::Busy => BUSY_TITLE,
        }
    }
}

/// 通知の重要度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// ユーザーに見せる通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { severity: Severity::Info, title: title.into(), message: message.into() }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, title: title.into(), message: message.into() }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, title: title.into(), message: message.into() }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.title, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_status_titles() {
        assert_eq!(BusyStatus::default(), BusyStatus::Idle);
        assert_eq!(BusyStatus::Idle.title(), "Universal Info Extractor");
        assert!(BusyStatus::Busy.is_busy());
        assert!(BusyStatus::Busy.title().contains("Processing"));
    }

    #[test]
    fn test_notification_display() {
        let n = Notification::warning("Invalid File Type", "Please drop a valid image file");
        assert_eq!(
            n.to_string(),
            "[warning] Invalid File Type: Please drop a valid image file"
        );
    }
}
