mod batch;
mod client;
mod types;
mod validate;

pub use batch::{process_batch, run_confirm, run_upload, spawn_batch, spawn_confirm};
pub use client::{UploadClient, UploadError};
pub use types::{
    ConfirmTag, FileSource, SelectedFile, ServerReply, Severity, StatusMessage, UploadEvent,
};
pub use validate::is_csv;
