use autoform_common::{InvalidInput, SubmissionOutcome};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoFormError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("抽出サービスに接続できません: {0}")]
    Connectivity(#[source] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("HTTP通信エラー: {0}")]
    Http(#[source] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] autoform_common::Error),
}

impl From<reqwest::Error> for AutoFormError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            AutoFormError::Connectivity(err)
        } else {
            AutoFormError::Http(err)
        }
    }
}

impl From<AutoFormError> for SubmissionOutcome {
    fn from(err: AutoFormError) -> Self {
        match err {
            AutoFormError::InvalidInput(reason)
            | AutoFormError::Common(autoform_common::Error::InvalidInput(reason)) => {
                SubmissionOutcome::InvalidInput(reason)
            }
            AutoFormError::Connectivity(source) => {
                SubmissionOutcome::ConnectivityFailure(error_chain(&source))
            }
            other => SubmissionOutcome::UnexpectedFailure(error_chain(&other)),
        }
    }
}

/// エラーとその原因を ": " でつなげた文字列
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

pub type Result<T> = std::result::Result<T, AutoFormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_is_unexpected_failure() {
        let err = AutoFormError::HttpStatus { status: 500, body: "Internal Server Error".into() };
        let outcome = SubmissionOutcome::from(err);
        assert_eq!(
            outcome,
            SubmissionOutcome::UnexpectedFailure("HTTP status 500: Internal Server Error".into())
        );
    }

    #[test]
    fn test_parse_failure_is_unexpected_failure() {
        let common = autoform_common::Error::Parse("expected a JSON object, got array".into());
        let outcome = SubmissionOutcome::from(AutoFormError::from(common));
        match outcome {
            SubmissionOutcome::UnexpectedFailure(detail) => assert!(detail.contains("array")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_io_failure_is_unexpected_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let outcome = SubmissionOutcome::from(AutoFormError::from(io));
        assert!(matches!(outcome, SubmissionOutcome::UnexpectedFailure(ref d) if d.contains("access denied")));
    }

    #[test]
    fn test_invalid_input_is_preserved() {
        let reason = InvalidInput::UnsupportedExtension { path: "scan.tiff".into() };
        let outcome = SubmissionOutcome::from(AutoFormError::from(reason.clone()));
        assert_eq!(outcome, SubmissionOutcome::InvalidInput(reason.clone()));

        let wrapped = AutoFormError::Common(autoform_common::Error::InvalidInput(reason.clone()));
        assert_eq!(SubmissionOutcome::from(wrapped), SubmissionOutcome::InvalidInput(reason));
    }

    #[test]
    fn test_error_chain_skips_repeated_text() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = AutoFormError::Io(io);
        assert_eq!(error_chain(&err), "IOエラー: disk gone");
    }
}
