use crate::upload::client::UploadClient;
use crate::upload::types::{SelectedFile, ServerReply, Severity, StatusMessage, UploadEvent};
use crate::upload::validate::is_csv;
use std::sync::mpsc::Sender;
use tokio::runtime::Runtime;

/// Handles one batch of selected files: rejects non-CSV files without
/// touching the network and starts an independent upload task for each
/// accepted file. Events arrive on `sender` in completion order.
pub async fn process_batch(
    client: UploadClient,
    files: Vec<SelectedFile>,
    sender: Sender<UploadEvent>,
) {
    let mut tasks = Vec::new();

    for file in files {
        if !is_csv(&file) {
            log::info!("rejected {}: not a CSV file", file.name);
            sender
                .send(UploadEvent::Message(StatusMessage::new(
                    format!("invalid file format: {}", file.name),
                    Severity::Danger,
                )))
                .unwrap_or_default();
            continue;
        }

        let client = client.clone();
        let sender = sender.clone();
        tasks.push(tokio::spawn(async move {
            let event = run_upload(&client, &file).await;
            sender.send(event).unwrap_or_default();
        }));
    }

    for task in tasks {
        let _ = task.await;
    }
}

/// One upload attempt. Every outcome maps to exactly one event; the
/// confirm reply defers its final message to the confirm attempt.
pub async fn run_upload(client: &UploadClient, file: &SelectedFile) -> UploadEvent {
    match client.upload(file).await {
        Ok(ServerReply::Confirm {
            message,
            filename,
            file_hash,
            ..
        }) => UploadEvent::ConfirmNeeded {
            prompt: message,
            filename,
            file_hash,
        },
        Ok(ServerReply::Success { success }) => UploadEvent::Message(StatusMessage::new(
            format!("{}: {}", file.name, success),
            Severity::Success,
        )),
        Ok(ServerReply::Error { error }) => UploadEvent::Message(StatusMessage::new(
            format!("{}: {}", file.name, error),
            Severity::Danger,
        )),
        Err(err) => {
            log::warn!("upload of {} failed: {}", file.name, err);
            UploadEvent::Message(StatusMessage::new(
                format!("{}: error during upload", file.name),
                Severity::Danger,
            ))
        }
    }
}

/// Second-phase attempt after the user accepted the server's prompt.
/// Keyed by the server-returned filename; the original file handle is
/// no longer relevant at this point.
pub async fn run_confirm(client: &UploadClient, filename: &str, file_hash: &str) -> UploadEvent {
    match client.confirm_upload(filename, file_hash).await {
        Ok(ServerReply::Success { success }) => UploadEvent::Message(StatusMessage::new(
            format!("{}: {}", filename, success),
            Severity::Success,
        )),
        Ok(ServerReply::Error { error }) | Ok(ServerReply::Confirm { message: error, .. }) => {
            UploadEvent::Message(StatusMessage::new(
                format!("{}: {}", filename, error),
                Severity::Danger,
            ))
        }
        Err(err) => {
            log::warn!("forced upload of {} failed: {}", filename, err);
            UploadEvent::Message(StatusMessage::new(
                format!("{}: error during forced upload", filename),
                Severity::Danger,
            ))
        }
    }
}

/// Runs a batch on a dedicated worker thread so the UI thread never
/// blocks on network traffic.
pub fn spawn_batch(client: UploadClient, files: Vec<SelectedFile>, sender: Sender<UploadEvent>) {
    std::thread::spawn(move || {
        let rt = Runtime::new().expect("failed to start upload runtime");
        rt.block_on(process_batch(client, files, sender));
    });
}

/// Runs one confirm attempt on a worker thread.
pub fn spawn_confirm(
    client: UploadClient,
    filename: String,
    file_hash: String,
    sender: Sender<UploadEvent>,
) {
    std::thread::spawn(move || {
        let rt = Runtime::new().expect("failed to start upload runtime");
        let event = rt.block_on(async { run_confirm(&client, &filename, &file_hash).await });
        sender.send(event).unwrap_or_default();
    });
}
