//! AutoForm Common Library
//!
//! CLIとデスクトップで共有される型と入力検証

pub mod error;
pub mod file_ref;
pub mod outcome;
pub mod status;
pub mod types;

pub use error::{Error, Result};
pub use file_ref::{
    is_image_extension, is_image_path, FileReference, InvalidInput, SubmissionOrigin,
    IMAGE_EXTENSIONS, IMAGE_FILTER_NAME,
};
pub use outcome::SubmissionOutcome;
pub use status::{BusyStatus, Notification, Severity, BUSY_TITLE, IDLE_TITLE};
pub use types::{ExtractionResult, OutputFields, RecognizedField, RECOGNIZED_FIELDS};
