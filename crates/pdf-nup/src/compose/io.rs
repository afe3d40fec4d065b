//! Document I/O for composition

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load a source PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Save the composed document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, NupError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

/// Output filename derived from the input: `<stem>_layoutChanged.pdf`
pub fn output_filename(input: impl AsRef<Path>) -> String {
    let stem = input
        .as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    format!("{stem}_layoutChanged.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_output_filename_from_stem() {
        assert_eq!(output_filename("report.pdf"), "report_layoutChanged.pdf");
        assert_eq!(
            output_filename("/tmp/dir/scan.2024.pdf"),
            "scan.2024_layoutChanged.pdf"
        );
    }

    #[test]
    fn falls_back_when_no_stem() {
        assert_eq!(output_filename(""), "output_layoutChanged.pdf");
    }
}
