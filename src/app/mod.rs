mod state;
mod ui;

use crate::upload::{self, SelectedFile, UploadClient};
use eframe::egui;
pub use state::{PendingConfirm, UploaderState};
use std::sync::Arc;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Environment variable that seeds the server URL field at startup.
pub const SERVER_URL_ENV: &str = "CSV_UPLOADER_SERVER";

pub struct CsvUploader {
    state: UploaderState,
}

impl CsvUploader {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let server_url =
            std::env::var(SERVER_URL_ENV).unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        log::info!("starting CSV uploader against {}", server_url);
        Self {
            state: UploaderState::new(server_url),
        }
    }

    /// Entry point for both input paths: clears the previous batch's
    /// status lines and hands the files to the upload workers.
    pub fn handle_batch(&mut self, files: Vec<SelectedFile>) {
        if files.is_empty() {
            return;
        }
        log::info!("handling batch of {} file(s)", files.len());

        self.state.begin_batch();

        let client = UploadClient::new(self.state.server_url.clone());
        upload::spawn_batch(client, files, self.state.event_sender.clone());
    }

    /// Resolves the oldest pending confirmation. Accepting re-posts the
    /// server-returned filename and hash; declining only leaves a note.
    pub fn resolve_confirm(&mut self, accepted: bool) {
        if let Some(pending) = self.state.resolve_confirm(accepted) {
            log::info!("forcing upload of {}", pending.filename);
            let client = UploadClient::new(self.state.server_url.clone());
            upload::spawn_confirm(
                client,
                pending.filename,
                pending.file_hash,
                self.state.event_sender.clone(),
            );
        }
    }

    /// Collects files dropped onto the window this frame.
    fn take_dropped_files(&mut self, ctx: &egui::Context) -> Vec<SelectedFile> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        dropped
            .into_iter()
            .map(|file| match (file.path, file.bytes) {
                (Some(path), _) => SelectedFile::from_path(path),
                // Dropped without a backing path (e.g. drag payloads that
                // arrive as raw bytes). Native drops declare no media type,
                // so validation falls back to the name's extension.
                (None, bytes) => SelectedFile {
                    name: file.name,
                    media_type: None,
                    source: crate::upload::FileSource::Memory(
                        bytes.unwrap_or_else(|| Arc::from(Vec::<u8>::new())),
                    ),
                },
            })
            .collect()
    }
}

impl eframe::App for CsvUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dropped = self.take_dropped_files(ctx);
        if !dropped.is_empty() {
            self.handle_batch(dropped);
        }

        if self.state.drain_events() {
            ctx.request_repaint();
        }

        self.render(ctx);

        // Keep polling while workers may still report back.
        if !self.state.pending_confirms.is_empty() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
