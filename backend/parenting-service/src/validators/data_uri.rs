/// Parsing of `data:<mimetype>;base64,<payload>` photo URIs
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataUriError {
    #[error("Please provide a photo to analyze.")]
    Missing,

    #[error("Photo must be a data URI of the form data:<mimetype>;base64,<data>.")]
    Malformed,

    #[error("Photo must be an image, got {0}.")]
    NotAnImage(String),

    #[error("Photo data is not valid base64.")]
    InvalidBase64,

    #[error("Photo is too large (maximum {max} bytes).")]
    TooLarge { max: usize },
}

/// A validated image data URI, ready to be sent as inline model input
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoDataUri {
    mime_type: String,
    data: String,
    decoded_len: usize,
}

impl PhotoDataUri {
    pub fn parse(raw: &str, max_bytes: usize) -> Result<Self, DataUriError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DataUriError::Missing);
        }

        let rest = raw.strip_prefix("data:").ok_or(DataUriError::Malformed)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUriError::Malformed)?;

        let mut segments = header.split(';');
        let media_type = segments.next().unwrap_or_default();
        if !segments.any(|s| s.eq_ignore_ascii_case("base64")) {
            return Err(DataUriError::Malformed);
        }

        let mime: mime::Mime = media_type.parse().map_err(|_| DataUriError::Malformed)?;
        if mime.type_() != mime::IMAGE {
            return Err(DataUriError::NotAnImage(mime.essence_str().to_string()));
        }

        // Cheap upper bound before paying for the decode
        if payload.len() / 4 * 3 > max_bytes + 2 {
            return Err(DataUriError::TooLarge { max: max_bytes });
        }

        let decoded = STANDARD
            .decode(payload)
            .map_err(|_| DataUriError::InvalidBase64)?;
        if decoded.is_empty() {
            return Err(DataUriError::InvalidBase64);
        }
        if decoded.len() > max_bytes {
            return Err(DataUriError::TooLarge { max: max_bytes });
        }

        Ok(Self {
            mime_type: mime.essence_str().to_string(),
            data: payload.to_string(),
            decoded_len: decoded.len(),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Base64 payload, exactly as received
    pub fn base64_data(&self) -> &str {
        &self.data
    }

    pub fn decoded_len(&self) -> usize {
        self.decoded_len
    }
}

impl std::fmt::Debug for PhotoDataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoDataUri")
            .field("mime_type", &self.mime_type)
            .field("decoded_len", &self.decoded_len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_PIXEL: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    fn png_uri() -> String {
        format!("data:image/png;base64,{}", PNG_PIXEL)
    }

    #[test]
    fn test_parse_valid_png() {
        let photo = PhotoDataUri::parse(&png_uri(), 1024).unwrap();
        assert_eq!(photo.mime_type(), "image/png");
        assert_eq!(photo.base64_data(), PNG_PIXEL);
        assert!(photo.decoded_len() > 0);
    }

    #[test]
    fn test_parse_rejects_missing_and_malformed() {
        assert_eq!(PhotoDataUri::parse("  ", 1024), Err(DataUriError::Missing));
        assert_eq!(
            PhotoDataUri::parse("https://example.com/baby.png", 1024),
            Err(DataUriError::Malformed)
        );
        assert_eq!(
            PhotoDataUri::parse("data:image/png,rawbytes", 1024),
            Err(DataUriError::Malformed)
        );
    }

    #[test]
    fn test_parse_rejects_non_image() {
        assert_eq!(
            PhotoDataUri::parse("data:text/plain;base64,aGVsbG8=", 1024),
            Err(DataUriError::NotAnImage("text/plain".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_bad_base64() {
        assert_eq!(
            PhotoDataUri::parse("data:image/jpeg;base64,@@@not-base64@@@", 1024),
            Err(DataUriError::InvalidBase64)
        );
    }

    #[test]
    fn test_parse_rejects_oversized_photo() {
        assert_eq!(
            PhotoDataUri::parse(&png_uri(), 16),
            Err(DataUriError::TooLarge { max: 16 })
        );
    }

    #[test]
    fn test_parse_accepts_extra_parameters() {
        let uri = format!("data:image/png;name=baby.png;base64,{}", PNG_PIXEL);
        assert!(PhotoDataUri::parse(&uri, 1024).is_ok());
    }
}
