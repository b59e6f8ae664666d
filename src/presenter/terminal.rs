use std::time::Duration;

use autoform_common::{
    BusyStatus, FileReference, Notification, OutputFields, Severity, RECOGNIZED_FIELDS,
};
use indicatif::{ProgressBar, ProgressStyle};

use super::Presenter;

/// ターミナル向けの表示層
///
/// 処理中はスピナーを表示し、通知は重要度に応じて stdout/stderr に出す。
/// `json` が有効な場合、stdout にはフィールドのJSONだけを書く。
#[derive(Default)]
pub struct TerminalPresenter {
    json: bool,
    spinner: Option<ProgressBar>,
    fields: OutputFields,
    last_notification: Option<Notification>,
}

impl TerminalPresenter {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            ..Default::default()
        }
    }

    pub fn fields(&self) -> &OutputFields {
        &self.fields
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.last_notification.as_ref()
    }

    fn print(&self, to_stderr: bool, text: &str) {
        let write = || {
            if to_stderr {
                eprintln!("{}", text);
            } else {
                println!("{}", text);
            }
        };
        match &self.spinner {
            Some(spinner) => spinner.suspend(write),
            None => write(),
        }
    }
}

impl Presenter for TerminalPresenter {
    fn set_busy(&mut self, status: BusyStatus) {
        match status {
            BusyStatus::Busy => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(
                    ProgressStyle::with_template("{spinner} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                spinner.set_message(status.title());
                spinner.enable_steady_tick(Duration::from_millis(100));
                self.spinner = Some(spinner);
            }
            BusyStatus::Idle => {
                if let Some(spinner) = self.spinner.take() {
                    spinner.finish_and_clear();
                }
            }
        }
    }

    fn show_preview(&mut self, file: &FileReference) {
        self.print(true, &format!("📄 {}", file.path().display()));
    }

    fn show_fields(&mut self, fields: &OutputFields) {
        self.fields = fields.clone();

        if self.json {
            match serde_json::to_string_pretty(fields) {
                Ok(json) => self.print(false, &json),
                Err(err) => self.print(true, &format!("JSON出力に失敗: {}", err)),
            }
            return;
        }

        let lines: Vec<String> = RECOGNIZED_FIELDS
            .iter()
            .map(|field| format!("  {:<10} {}", field.label(), fields.get(*field).unwrap_or("-")))
            .collect();
        self.print(false, &lines.join("\n"));
    }

    fn notify(&mut self, notification: &Notification) {
        let (mark, to_stderr) = match notification.severity {
            Severity::Info => ("✔", self.json),
            Severity::Warning => ("⚠", true),
            Severity::Error => ("✖", true),
        };
        self.print(
            to_stderr,
            &format!("{} {}: {}", mark, notification.title, notification.message),
        );
        self.last_notification = Some(notification.clone());
    }
}
