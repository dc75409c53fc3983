use crate::upload::SelectedFile;
use std::path::Path;

/// Accepts a file when its name carries a `csv` extension (ASCII
/// case-insensitive) or the drag source declared the media type
/// `text/csv` exactly.
pub fn is_csv(file: &SelectedFile) -> bool {
    if file.media_type.as_deref() == Some("text/csv") {
        return true;
    }

    Path::new(&file.name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"))
}
