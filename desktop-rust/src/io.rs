use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use autoform::Presenter;
use autoform_common::{BusyStatus, FileReference, Notification, OutputFields};
use eframe::egui;
use image::ImageReader;

use crate::model::UiMessage;

pub const PREVIEW_MAX_SIZE: (u32, u32) = (480, 480);

pub struct PreviewData {
    pub path: PathBuf,
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
}

pub fn load_preview(path: &Path) -> Result<PreviewData> {
    let image = ImageReader::open(path)
        .with_context(|| format!("open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("detect format {}", path.display()))?
        .decode()
        .with_context(|| format!("decode {}", path.display()))?;
    let thumb = image.thumbnail(PREVIEW_MAX_SIZE.0, PREVIEW_MAX_SIZE.1);
    Ok(PreviewData {
        path: path.to_path_buf(),
        size: [thumb.width() as usize, thumb.height() as usize],
        pixels: thumb.to_rgba8().into_raw(),
    })
}

/// ワークフローの通知をUIスレッドへ転送する
pub struct ChannelPresenter {
    tx: Sender<UiMessage>,
    ctx: egui::Context,
}

impl ChannelPresenter {
    pub fn new(tx: Sender<UiMessage>, ctx: egui::Context) -> Self {
        Self { tx, ctx }
    }

    pub fn send(&self, msg: UiMessage) {
        let _ = self.tx.send(msg);
        self.ctx.request_repaint();
    }
}

impl Presenter for ChannelPresenter {
    fn set_busy(&mut self, status: BusyStatus) {
        self.send(UiMessage::Busy(status));
    }

    fn show_preview(&mut self, file: &FileReference) {
        self.send(UiMessage::Preview(file.path().to_path_buf()));
    }

    fn show_fields(&mut self, fields: &OutputFields) {
        self.send(UiMessage::Fields(fields.clone()));
    }

    fn notify(&mut self, notification: &Notification) {
        self.send(UiMessage::Notify(notification.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_channel_presenter_forwards_in_order() {
        let (tx, rx) = mpsc::channel();
        let mut presenter = ChannelPresenter::new(tx, egui::Context::default());

        presenter.set_busy(BusyStatus::Busy);
        presenter.show_fields(&OutputFields { gpa: Some("3.2".into()), ..Default::default() });
        presenter.notify(&Notification::info("Success", "Extraction complete!"));
        presenter.set_busy(BusyStatus::Idle);

        let received: Vec<UiMessage> = rx.try_iter().collect();
        assert_eq!(received.len(), 4);
        assert_eq!(received[0], UiMessage::Busy(BusyStatus::Busy));
        assert!(matches!(&received[1], UiMessage::Fields(f) if f.gpa.as_deref() == Some("3.2")));
        assert_eq!(received[3], UiMessage::Busy(BusyStatus::Idle));
    }

    #[test]
    fn test_load_preview_missing_file() {
        assert!(load_preview(Path::new("/nonexistent/preview.png")).is_err());
    }
}
