//! Drawing format detection
//!
//! Uploads arrive as raw bytes; the format is sniffed from magic numbers
//! rather than trusting a client-supplied content type.

/// Accepted drawing formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingFormat {
    Pdf,
    Jpeg,
    Png,
}

impl DrawingFormat {
    /// Detect the format from the file's magic bytes.
    ///
    /// Returns `None` for anything that is not a PDF, JPEG, or PNG.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        const JPEG_SOI: &[u8] = &[0xFF, 0xD8, 0xFF];

        if bytes.starts_with(b"%PDF-") {
            Some(Self::Pdf)
        } else if bytes.starts_with(PNG_SIGNATURE) {
            Some(Self::Png)
        } else if bytes.starts_with(JPEG_SOI) {
            Some(Self::Jpeg)
        } else {
            None
        }
    }

    /// MIME type sent to the model alongside the drawing data
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pdf() {
        let bytes = b"%PDF-1.7\n%drawing content";
        assert_eq!(DrawingFormat::detect(bytes), Some(DrawingFormat::Pdf));
    }

    #[test]
    fn test_detect_png() {
        let bytes = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
        assert_eq!(DrawingFormat::detect(&bytes), Some(DrawingFormat::Png));
    }

    #[test]
    fn test_detect_jpeg() {
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(DrawingFormat::detect(&bytes), Some(DrawingFormat::Jpeg));
    }

    #[test]
    fn test_unknown_format_is_none() {
        assert_eq!(DrawingFormat::detect(b"GIF89a"), None);
        assert_eq!(DrawingFormat::detect(b"plain text"), None);
        assert_eq!(DrawingFormat::detect(&[]), None);
    }

    #[test]
    fn test_truncated_signature_is_none() {
        // PNG signature cut short
        assert_eq!(DrawingFormat::detect(&[0x89, b'P', b'N']), None);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(DrawingFormat::Pdf.mime_type(), "application/pdf");
        assert_eq!(DrawingFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(DrawingFormat::Png.mime_type(), "image/png");
    }
}
