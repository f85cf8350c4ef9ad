use super::errors::DeployError;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Name of the single entry in a deploy archive.
pub const INDEX_FILE_NAME: &str = "index.html";

/// Packages one HTML document as an uncompressed single-entry ZIP.
pub fn build_site_archive(html: &str) -> Result<Vec<u8>, DeployError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    zip.start_file(INDEX_FILE_NAME, options)?;
    zip.write_all(html.as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn archive_holds_one_stored_index_file() {
        let html = "<!DOCTYPE html><html><body>hello</body></html>";
        let bytes = build_site_archive(html).unwrap();

        assert_eq!(&bytes[..4], b"PK\x03\x04");

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 1);

        let mut entry = archive.by_index(0).unwrap();
        assert_eq!(entry.name(), INDEX_FILE_NAME);
        assert_eq!(entry.compression(), CompressionMethod::Stored);

        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, html);
    }
}
