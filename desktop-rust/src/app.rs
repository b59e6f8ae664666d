use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use autoform::SubmissionWorkflow;
use autoform_common::{
    IMAGE_EXTENSIONS, IMAGE_FILTER_NAME, RECOGNIZED_FIELDS, Severity, SubmissionOrigin,
};
use eframe::egui::{self, Color32, RichText};
use tracing::{debug, warn};

use crate::io::{ChannelPresenter, PreviewData, load_preview};
use crate::model::{AppState, UiMessage};

const PREVIEW_BOX: (f32, f32) = (360.0, 360.0);

pub struct DesktopApp {
    state: AppState,
    workflow: Arc<SubmissionWorkflow>,
    runtime: tokio::runtime::Runtime,
    ui_tx: Sender<UiMessage>,
    ui_rx: Receiver<UiMessage>,
    preview_tx: Sender<PreviewData>,
    preview_rx: Receiver<PreviewData>,
    preview: Option<egui::TextureHandle>,
    applied_title: Option<&'static str>,
    status: String,
}

impl DesktopApp {
    pub fn new(workflow: SubmissionWorkflow, runtime: tokio::runtime::Runtime) -> Self {
        let (ui_tx, ui_rx) = mpsc::channel();
        let (preview_tx, preview_rx) = mpsc::channel();
        Self {
            state: AppState::default(),
            workflow: Arc::new(workflow),
            runtime,
            ui_tx,
            ui_rx,
            preview_tx,
            preview_rx,
            preview: None,
            applied_title: None,
            status: String::new(),
        }
    }

    fn pick_file(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter(IMAGE_FILTER_NAME, IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.start_submission(ctx, path, SubmissionOrigin::Pick);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(path) = dropped.into_iter().find_map(|f| f.path) else {
            return;
        };
        self.start_submission(ctx, path, SubmissionOrigin::Drop);
    }

    fn start_submission(&mut self, ctx: &egui::Context, path: PathBuf, origin: SubmissionOrigin) {
        if !self.state.accepts_submission() {
            warn!(path = %path.display(), "submission already in progress; ignoring");
            self.status = "Still processing the previous image".to_string();
            return;
        }
        self.state.in_flight = true;
        self.status.clear();

        let workflow = Arc::clone(&self.workflow);
        let mut presenter = ChannelPresenter::new(self.ui_tx.clone(), ctx.clone());

        self.runtime.spawn(async move {
            let outcome = workflow.submit(&path, origin, &mut presenter).await;
            debug!(success = outcome.is_success(), "submission finished");
            presenter.send(UiMessage::Finished);
        });
    }

    fn request_preview(&mut self, path: PathBuf) {
        self.preview = None;
        let sender = self.preview_tx.clone();
        std::thread::spawn(move || match load_preview(&path) {
            Ok(data) => {
                let _ = sender.send(data);
            }
            Err(err) => warn!("preview failed: {err:#}"),
        });
    }

    fn poll_messages(&mut self, ctx: &egui::Context) {
        while let Ok(msg) = self.ui_rx.try_recv() {
            if let UiMessage::Preview(path) = &msg {
                self.request_preview(path.clone());
            }
            self.state.apply(msg);
        }

        while let Ok(data) = self.preview_rx.try_recv() {
            if self.state.preview_path.as_deref() != Some(data.path.as_path()) {
                continue;
            }
            let color_image = egui::ColorImage::from_rgba_unmultiplied(data.size, &data.pixels);
            let texture = ctx.load_texture(
                data.path.display().to_string(),
                color_image,
                egui::TextureOptions::default(),
            );
            self.preview = Some(texture);
        }
    }

    fn sync_busy_affordances(&mut self, ctx: &egui::Context) {
        let title = self.state.status.title();
        if self.applied_title != Some(title) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.to_string()));
            self.applied_title = Some(title);
        }
        if self.state.status.is_busy() {
            ctx.output_mut(|o| o.cursor_icon = egui::CursorIcon::Wait);
        }
    }

    fn render_fields(&self, ui: &mut egui::Ui) {
        egui::Grid::new("fields")
            .num_columns(2)
            .spacing([12.0, 10.0])
            .show(ui, |ui| {
                for field in RECOGNIZED_FIELDS {
                    ui.label(RichText::new(field.label()).strong());
                    let mut text: &str = self.state.fields.get(*field).unwrap_or("");
                    ui.add(egui::TextEdit::singleline(&mut text).desired_width(240.0));
                    ui.end_row();
                }
            });
    }

    fn render_preview(&self, ui: &mut egui::Ui, hovering: bool) {
        let size = egui::vec2(PREVIEW_BOX.0, PREVIEW_BOX.1);
        let stroke_color = if hovering { Color32::from_rgb(246, 196, 69) } else { Color32::from_gray(80) };
        egui::Frame::none()
            .stroke(egui::Stroke::new(1.0, stroke_color))
            .rounding(egui::Rounding::same(8.0))
            .show(ui, |ui| {
                ui.allocate_ui_with_layout(
                    size,
                    egui::Layout::centered_and_justified(egui::Direction::TopDown),
                    |ui| match &self.preview {
                        Some(texture) => {
                            ui.add(egui::Image::new(texture).max_size(size));
                        }
                        None if self.state.preview_path.is_some() => {
                            ui.label("Loading preview...");
                        }
                        None => {
                            ui.label("Drop an image file here (JPG, PNG, BMP)");
                        }
                    },
                );
            });
    }

    fn render_notification(&mut self, ctx: &egui::Context) {
        let Some(notification) = self.state.notification.clone() else {
            return;
        };
        let color = match notification.severity {
            Severity::Info => Color32::from_rgb(120, 200, 140),
            Severity::Warning => Color32::from_rgb(246, 196, 69),
            Severity::Error => Color32::from_rgb(230, 90, 90),
        };

        let mut close = false;
        egui::Window::new(RichText::new(&notification.title).color(color))
            .id(egui::Id::new("notification"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(notification.message.as_str());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    close = true;
                }
            });

        if close {
            self.state.notification = None;
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_messages(ctx);
        if self.state.accepts_submission() {
            self.handle_dropped_files(ctx);
        } else if ctx.input(|i| !i.raw.dropped_files.is_empty()) {
            self.status = "Still processing the previous image".to_string();
        }
        self.sync_busy_affordances(ctx);

        let busy = !self.state.accepts_submission();
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if busy {
                    ui.spinner();
                    ui.label(self.state.status.title());
                } else if !self.status.is_empty() {
                    ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
                } else if let Some(path) = &self.state.preview_path {
                    ui.label(RichText::new(path.display().to_string()).color(Color32::from_gray(170)));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Student Form");
            ui.separator();
            ui.horizontal_top(|ui| {
                self.render_preview(ui, hovering && !busy);
                ui.add_space(16.0);
                ui.vertical(|ui| {
                    self.render_fields(ui);
                    ui.add_space(16.0);
                    if ui.add_enabled(!busy, egui::Button::new("Select Image...")).clicked() {
                        self.pick_file(ctx);
                    }
                });
            });
        });

        self.render_notification(ctx);
    }
}
