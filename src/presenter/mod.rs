//! 表示層とのインターフェース
//!
//! 送信ワークフローは表示方法を知らず、このトレイト越しに状態を通知する。

mod terminal;

pub use terminal::TerminalPresenter;

use autoform_common::{BusyStatus, FileReference, Notification, OutputFields};

pub trait Presenter {
    /// 処理中/待機中の切り替え（タイトルやカーソルに反映する）
    fn set_busy(&mut self, status: BusyStatus);

    /// 検証を通ったファイルのプレビュー
    fn show_preview(&mut self, _file: &FileReference) {}

    /// 4つのフィールドをまとめて置き換える
    fn show_fields(&mut self, fields: &OutputFields);

    fn notify(&mut self, notification: &Notification);
}
