use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Severity of a rendered status line, mirroring the alert classes the
/// server's own web page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
    Info,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// One file picked by the user, either dropped onto the window or chosen
/// through the native file dialog.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    /// Media type declared by the drag source, when the windowing system
    /// provides one. Native drops usually leave this empty.
    pub media_type: Option<String>,
    pub source: FileSource,
}

#[derive(Debug, Clone)]
pub enum FileSource {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

impl SelectedFile {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            media_type: None,
            source: FileSource::Path(path),
        }
    }
}

/// Reply contract shared by `/upload` and `/confirm_upload`. The server
/// sends exactly one of these shapes; the confirm shape is tried first so
/// that its extra fields win over a bare success/error match.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ServerReply {
    Confirm {
        status: ConfirmTag,
        message: String,
        filename: String,
        file_hash: String,
    },
    Success {
        success: String,
    },
    Error {
        error: String,
    },
}

/// The literal `"status": "confirm"` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ConfirmTag {
    #[serde(rename = "confirm")]
    Confirm,
}

/// What a finished upload or confirm task reports back to the UI thread.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    Message(StatusMessage),
    /// The server asked for explicit consent before finalizing the upload.
    ConfirmNeeded {
        prompt: String,
        filename: String,
        file_hash: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_success_reply() {
        let reply: ServerReply = serde_json::from_str(r#"{"success": "saved 3 rows"}"#).unwrap();
        assert_eq!(
            reply,
            ServerReply::Success {
                success: "saved 3 rows".to_string()
            }
        );
    }

    #[test]
    fn decodes_error_reply() {
        let reply: ServerReply = serde_json::from_str(r#"{"error": "malformed CSV"}"#).unwrap();
        assert_eq!(
            reply,
            ServerReply::Error {
                error: "malformed CSV".to_string()
            }
        );
    }

    #[test]
    fn confirm_shape_wins_over_bare_field_match() {
        let body = r#"{
            "status": "confirm",
            "message": "Duplicate content. Upload anyway?",
            "filename": "ledger.csv",
            "file_hash": "abc123"
        }"#;
        let reply: ServerReply = serde_json::from_str(body).unwrap();
        match reply {
            ServerReply::Confirm {
                message,
                filename,
                file_hash,
                ..
            } => {
                assert_eq!(message, "Duplicate content. Upload anyway?");
                assert_eq!(filename, "ledger.csv");
                assert_eq!(file_hash, "abc123");
            }
            other => panic!("expected confirm reply, got {:?}", other),
        }
    }

    #[test]
    fn rejects_reply_matching_no_shape() {
        let result: Result<ServerReply, _> = serde_json::from_str(r#"{"status": "weird"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn selected_file_name_comes_from_path() {
        let file = SelectedFile::from_path(PathBuf::from("/tmp/export/ledger.csv"));
        assert_eq!(file.name, "ledger.csv");
        assert!(file.media_type.is_none());
    }
}
