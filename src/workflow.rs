//! 送信ワークフロー
//!
//! 1. 候補ファイルを検証（失敗時は通知のみ、通信・処理中表示なし）
//! 2. 処理中表示に切り替え
//! 3. 抽出サービスへ送信し、レスポンスをパース
//! 4. 成功時のみフィールドをクリアして反映
//! 5. 結果を通知し、必ず待機中表示に戻す

use std::ops::{Deref, DerefMut};
use std::path::Path;

use autoform_common::{
    BusyStatus, FileReference, OutputFields, SubmissionOrigin, SubmissionOutcome,
};
use tracing::{error, info, warn};

use crate::client::ExtractionClient;
use crate::error::error_chain;
use crate::presenter::Presenter;

pub struct SubmissionWorkflow {
    client: ExtractionClient,
}

impl SubmissionWorkflow {
    pub fn new(client: ExtractionClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ExtractionClient {
        &self.client
    }

    /// 候補ファイルを1件送信する
    pub async fn submit<P>(
        &self,
        path: &Path,
        origin: SubmissionOrigin,
        presenter: &mut P,
    ) -> SubmissionOutcome
    where
        P: Presenter + ?Sized,
    {
        let file = match FileReference::validate(path, origin) {
            Ok(file) => file,
            Err(reason) => {
                warn!(path = %path.display(), ?origin, %reason, "rejected candidate file");
                let outcome = SubmissionOutcome::InvalidInput(reason);
                presenter.notify(&outcome.notification());
                return outcome;
            }
        };

        presenter.show_preview(&file);
        info!(file = file.file_name(), endpoint = %self.client.endpoint(), "submitting image");

        let mut busy = BusyGuard::enter(presenter);

        let outcome = match self.client.extract(&file).await {
            Ok(result) => {
                if let Some(reported) = result.service_error() {
                    warn!(file = file.file_name(), reported, "extraction service reported an error");
                }
                let unrecognized = result.unrecognized_keys();
                if !unrecognized.is_empty() {
                    info!(?unrecognized, "ignoring unrecognized keys");
                }
                busy.show_fields(&OutputFields::from_extraction(&result));
                info!(file = file.file_name(), keys = result.len(), "extraction complete");
                SubmissionOutcome::Success(result)
            }
            Err(err) => {
                error!(file = file.file_name(), error = %error_chain(&err), "submission failed");
                SubmissionOutcome::from(err)
            }
        };

        busy.notify(&outcome.notification());
        drop(busy);

        outcome
    }
}

/// 処理中表示のガード
///
/// drop 時に必ず待機中へ戻す（エラー時や future が破棄された場合も含む）。
struct BusyGuard<'a, P: Presenter + ?Sized> {
    presenter: &'a mut P,
}

impl<'a, P: Presenter + ?Sized> BusyGuard<'a, P> {
    fn enter(presenter: &'a mut P) -> Self {
        presenter.set_busy(BusyStatus::Busy);
        Self { presenter }
    }
}

impl<P: Presenter + ?Sized> Deref for BusyGuard<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.presenter
    }
}

impl<P: Presenter + ?Sized> DerefMut for BusyGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.presenter
    }
}

impl<P: Presenter + ?Sized> Drop for BusyGuard<'_, P> {
    fn drop(&mut self) {
        self.presenter.set_busy(BusyStatus::Idle);
    }
}
