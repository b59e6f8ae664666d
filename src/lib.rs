//! AutoForm
//!
//! フォーム画像を抽出サービスへ送り、返ってきたキー/値を
//! 4つの出力フィールド（名・姓・専攻・GPA）に反映する。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod presenter;
pub mod workflow;

pub use client::ExtractionClient;
pub use config::Config;
pub use error::{AutoFormError, Result};
pub use presenter::{Presenter, TerminalPresenter};
pub use workflow::SubmissionWorkflow;
