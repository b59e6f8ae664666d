use std::path::PathBuf;

use autoform_common::{BusyStatus, Notification, OutputFields};

/// ワーカーからUIスレッドへのメッセージ
#[derive(Debug, Clone, PartialEq)]
pub enum UiMessage {
    Busy(BusyStatus),
    Preview(PathBuf),
    Fields(OutputFields),
    Notify(Notification),
    Finished,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub fields: OutputFields,
    pub status: BusyStatus,
    pub preview_path: Option<PathBuf>,
    pub notification: Option<Notification>,
    pub in_flight: bool,
}

impl AppState {
    /// 新しい送信を始めてよいか
    pub fn accepts_submission(&self) -> bool {
        !self.in_flight && !self.status.is_busy()
    }

    pub fn apply(&mut self, msg: UiMessage) {
        match msg {
            UiMessage::Busy(status) => self.status = status,
            UiMessage::Preview(path) => self.preview_path = Some(path),
            UiMessage::Fields(fields) => self.fields = fields,
            UiMessage::Notify(notification) => self.notification = Some(notification),
            UiMessage::Finished => {
                self.in_flight = false;
                self.status = BusyStatus::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_keeps_previous_fields() {
        let mut state = AppState {
            fields: OutputFields { first_name: Some("Ada".into()), ..Default::default() },
            in_flight: true,
            ..Default::default()
        };

        state.apply(UiMessage::Busy(BusyStatus::Busy));
        assert!(!state.accepts_submission());
        state.apply(UiMessage::Notify(Notification::error("Error", "boom")));
        state.apply(UiMessage::Busy(BusyStatus::Idle));
        state.apply(UiMessage::Finished);

        assert_eq!(state.fields.first_name.as_deref(), Some("Ada"));
        assert!(state.accepts_submission());
        assert_eq!(state.notification.map(|n| n.title), Some("Error".to_string()));
    }

    #[test]
    fn test_in_flight_blocks_before_busy_arrives() {
        let state = AppState { in_flight: true, ..Default::default() };
        assert!(!state.accepts_submission());
    }
}
