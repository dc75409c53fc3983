//! Desktop client for the cider ledger's CSV upload endpoints.
//!
//! Files arrive by drag-and-drop or the native file dialog, get checked
//! for the `.csv` extension, and are posted to the server one request
//! per file. When the server flags an upload (duplicate content), the
//! user is asked before the upload is forced.

pub mod app;
pub mod upload;
