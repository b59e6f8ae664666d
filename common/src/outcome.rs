//! 送信1回分の結果

use crate::file_ref::InvalidInput;
use crate::status::Notification;
use crate::types::{ExtractionResult, OutputFields};

/// 送信結果
///
/// 失敗はどれもその回の送信を打ち切る。部分的な反映は行わない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// 抽出成功（未認識キーも含むマップ全体）
    Success(ExtractionResult),
    /// 入力ファイルが不正。通信は行っていない
    InvalidInput(InvalidInput),
    /// サービスに接続できない、または送信中の通信エラー
    ConnectivityFailure(String),
    /// それ以外の失敗（読み込み、HTTPステータス、レスポンス形式など）
    UnexpectedFailure(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }

    /// 成功時に表示するフィールド
    pub fn fields(&self) -> Option<OutputFields> {
        match self {
            SubmissionOutcome::Success(result) => Some(OutputFields::from_extraction(result)),
            _ => None,
        }
    }

    pub fn notification(&self) -> Notification {
        match self {
            SubmissionOutcome::Success(result) => {
                let mut message = String::from("Extraction complete!");
                if let Some(reported) = result.service_error() {
                    message.push_str("\n\nService reported: ");
                    message.push_str(reported);
                }
                Notification::info("Success", message)
            }
            SubmissionOutcome::InvalidInput(reason) => match reason {
                InvalidInput::MissingFile { .. } => {
                    Notification::error(reason.title(), reason.to_string())
                }
                InvalidInput::UnsupportedExtension { .. } => {
                    Notification::warning(reason.title(), reason.to_string())
                }
            },
            SubmissionOutcome::ConnectivityFailure(detail) => Notification::error(
                "API Connection Error",
                format!(
                    "Could not connect to the extraction service. Please ensure the service is running.\n\nDetails: {}",
                    detail
                ),
            ),
            SubmissionOutcome::UnexpectedFailure(detail) => {
                Notification::error("Error", format!("An unexpected error occurred: {}", detail))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Severity;

    #[test]
    fn test_success_notification() {
        let outcome = SubmissionOutcome::Success([("FOO", "bar")].into_iter().collect());
        let n = outcome.notification();
        assert_eq!(n.severity, Severity::Info);
        assert_eq!(n.title, "Success");
        assert_eq!(n.message, "Extraction complete!");
        assert!(outcome.fields().unwrap().is_empty());
    }

    #[test]
    fn test_success_notification_with_service_error() {
        let outcome =
            SubmissionOutcome::Success([("error", "Extraction failed: blurry")].into_iter().collect());
        let n = outcome.notification();
        assert_eq!(n.severity, Severity::Info);
        assert!(n.message.starts_with("Extraction complete!"));
        assert!(n.message.contains("Service reported: Extraction failed: blurry"));
    }

    #[test]
    fn test_invalid_input_severity() {
        let missing = SubmissionOutcome::InvalidInput(InvalidInput::MissingFile { path: "a.png".into() });
        assert_eq!(missing.notification().severity, Severity::Error);

        let ext = SubmissionOutcome::InvalidInput(InvalidInput::UnsupportedExtension {
            path: "a.gif".into(),
        });
        let n = ext.notification();
        assert_eq!(n.severity, Severity::Warning);
        assert_eq!(n.title, "Invalid File Type");
        assert!(ext.fields().is_none());
    }

    #[test]
    fn test_failure_notifications_carry_detail() {
        let conn = SubmissionOutcome::ConnectivityFailure("connection refused".into());
        let n = conn.notification();
        assert_eq!(n.title, "API Connection Error");
        assert!(n.message.contains("connection refused"));

        let unexpected = SubmissionOutcome::UnexpectedFailure("HTTP status 500".into());
        let n = unexpected.notification();
        assert_eq!(n.severity, Severity::Error);
        assert_eq!(n.message, "An unexpected error occurred: HTTP status 500");
        assert!(!unexpected.is_success());
    }
}
