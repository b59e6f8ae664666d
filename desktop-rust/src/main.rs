mod app;
mod io;
mod model;

use anyhow::Context;
use app::DesktopApp;
use autoform::{Config, ExtractionClient, SubmissionWorkflow, logging};
use autoform_common::IDLE_TITLE;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    logging::init_tracing(0);

    let config = Config::load().context("load config")?;
    let client = ExtractionClient::from_config(&config).context("create extraction client")?;
    let workflow = SubmissionWorkflow::new(client);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("start async runtime")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(IDLE_TITLE)
            .with_inner_size([760.0, 460.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        IDLE_TITLE,
        options,
        Box::new(move |_cc| Box::new(DesktopApp::new(workflow, runtime))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
