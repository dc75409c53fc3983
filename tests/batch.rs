use csv_uploader::upload::{
    process_batch, run_confirm, run_upload, FileSource, SelectedFile, Severity, StatusMessage,
    UploadClient, UploadEvent,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::mpsc::channel;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn memory_file(name: &str) -> SelectedFile {
    SelectedFile {
        name: name.to_string(),
        media_type: None,
        source: FileSource::Memory(Arc::from(b"a,b\n1,2\n".as_slice())),
    }
}

fn collect_messages(events: Vec<UploadEvent>) -> Vec<StatusMessage> {
    events
        .into_iter()
        .map(|event| match event {
            UploadEvent::Message(message) => message,
            other => panic!("expected a status message, got {:?}", other),
        })
        .collect()
}

#[tokio::test]
async fn non_csv_files_are_rejected_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": "ok"})))
        .expect(0)
        .mount(&server)
        .await;

    let (sender, receiver) = channel();
    let client = UploadClient::new(server.uri());
    process_batch(client, vec![memory_file("notes.txt")], sender).await;

    let messages = collect_messages(receiver.try_iter().collect());
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].severity, Severity::Danger);
    assert_eq!(messages[0].text, "invalid file format: notes.txt");
}

#[tokio::test]
async fn each_csv_file_is_uploaded_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": "saved"})))
        .expect(2)
        .mount(&server)
        .await;

    let (sender, receiver) = channel();
    let client = UploadClient::new(server.uri());
    process_batch(
        client,
        vec![
            memory_file("may.csv"),
            memory_file("skip.pdf"),
            memory_file("june.csv"),
        ],
        sender,
    )
    .await;

    let messages = collect_messages(receiver.try_iter().collect());
    assert_eq!(messages.len(), 3);

    let rejected: Vec<_> = messages
        .iter()
        .filter(|m| m.text == "invalid file format: skip.pdf")
        .collect();
    assert_eq!(rejected.len(), 1);

    // Uploads run concurrently, so success messages may arrive in any order.
    for name in ["may.csv", "june.csv"] {
        let found = messages
            .iter()
            .any(|m| m.severity == Severity::Success && m.text == format!("{}: saved", name));
        assert!(found, "missing success message for {}", name);
    }
}

#[tokio::test]
async fn success_reply_names_file_and_server_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": "ok"})))
        .mount(&server)
        .await;

    let client = UploadClient::new(server.uri());
    let event = run_upload(&client, &memory_file("ledger.csv")).await;

    match event {
        UploadEvent::Message(message) => {
            assert_eq!(message.severity, Severity::Success);
            assert_eq!(message.text, "ledger.csv: ok");
        }
        other => panic!("expected a status message, got {:?}", other),
    }
}

#[tokio::test]
async fn error_reply_names_file_and_server_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "bad"})))
        .mount(&server)
        .await;

    let client = UploadClient::new(server.uri());
    let event = run_upload(&client, &memory_file("ledger.csv")).await;

    match event {
        UploadEvent::Message(message) => {
            assert_eq!(message.severity, Severity::Danger);
            assert_eq!(message.text, "ledger.csv: bad");
        }
        other => panic!("expected a status message, got {:?}", other),
    }
}

#[tokio::test]
async fn confirm_reply_followed_by_acceptance_forces_the_upload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "confirm",
            "message": "dup?",
            "filename": "a.csv",
            "file_hash": "h1",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/confirm_upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": "forced"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = UploadClient::new(server.uri());
    let event = run_upload(&client, &memory_file("a.csv")).await;

    let (filename, file_hash) = match event {
        UploadEvent::ConfirmNeeded {
            prompt,
            filename,
            file_hash,
        } => {
            assert_eq!(prompt, "dup?");
            (filename, file_hash)
        }
        other => panic!("expected a confirmation request, got {:?}", other),
    };

    // User accepted the prompt.
    let event = run_confirm(&client, &filename, &file_hash).await;
    match event {
        UploadEvent::Message(message) => {
            assert_eq!(message.severity, Severity::Success);
            assert_eq!(message.text, "a.csv: forced");
        }
        other => panic!("expected a status message, got {:?}", other),
    }
}

#[tokio::test]
async fn transport_failure_yields_upload_error_message() {
    let (sender, receiver) = channel();
    let client = UploadClient::new("http://127.0.0.1:9");
    process_batch(client, vec![memory_file("ledger.csv")], sender).await;

    let messages = collect_messages(receiver.try_iter().collect());
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].severity, Severity::Danger);
    assert_eq!(messages[0].text, "ledger.csv: error during upload");
}

#[tokio::test]
async fn forced_upload_transport_failure_yields_its_own_message() {
    let client = UploadClient::new("http://127.0.0.1:9");
    let event = run_confirm(&client, "a.csv", "h1").await;

    match event {
        UploadEvent::Message(message) => {
            assert_eq!(message.severity, Severity::Danger);
            assert_eq!(message.text, "a.csv: error during forced upload");
        }
        other => panic!("expected a status message, got {:?}", other),
    }
}
