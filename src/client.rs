//! 抽出サービスのHTTPクライアント
//!
//! `POST {base}/extract-form/` に画像を multipart で送り、
//! 文字列値のJSONオブジェクトを受け取る。

use std::time::Duration;

use autoform_common::{ExtractionResult, FileReference};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use tracing::debug;

use crate::config::Config;
use crate::error::{AutoFormError, Result};

/// 抽出エンドポイントのパス
pub const EXTRACT_PATH: &str = "/extract-form/";

/// multipart のパート名
pub const FILE_PART_NAME: &str = "file";

/// エラーメッセージに含めるレスポンス本文の最大文字数
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct ExtractionClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ExtractionClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| AutoFormError::Config(format!("不正なURL {}: {}", base_url, e)))?;
        let endpoint = base
            .join(EXTRACT_PATH)
            .map_err(|e| AutoFormError::Config(format!("不正なURL {}: {}", base_url, e)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AutoFormError::Config(format!("HTTPクライアント生成失敗: {}", e)))?;

        Ok(Self { http, endpoint })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.base_url, config.timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// ファイルを送信して抽出結果を受け取る
    pub async fn extract(&self, file: &FileReference) -> Result<ExtractionResult> {
        let bytes = tokio::fs::read(file.path()).await?;
        debug!(file = file.file_name(), bytes = bytes.len(), "read image");

        let part = Part::bytes(bytes).file_name(file.file_name().to_string());
        let form = Form::new().part(FILE_PART_NAME, part);

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AutoFormError::HttpStatus {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let body = response.text().await?;
        debug!(%status, body = %body, "API response");

        Ok(ExtractionResult::from_json(&body)?)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_base_url() {
        let client = ExtractionClient::new("http://localhost:8000", None).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:8000/extract-form/");
    }

    #[test]
    fn test_endpoint_replaces_base_path() {
        let client = ExtractionClient::new("http://10.1.2.3:9000/api/", None).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://10.1.2.3:9000/extract-form/");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ExtractionClient::new("localhost without scheme", None).unwrap_err();
        assert!(matches!(err, AutoFormError::Config(_)));
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            base_url: "http://extractor:8000".into(),
            timeout_seconds: Some(10),
        };
        let client = ExtractionClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint().host_str(), Some("extractor"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("  short  ", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("あいうえお", 2), "あい...");
    }
}
