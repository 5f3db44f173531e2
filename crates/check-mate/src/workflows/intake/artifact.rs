use mime::Mime;
use std::path::Path;

/// A file handed in alongside the form, before any text is pulled out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedArtifact {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedArtifact {
    pub fn new(
        file_name: Option<String>,
        content_type: Option<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        ArtifactKind::classify(self.content_type.as_deref(), self.file_name.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Image,
    Text,
    Unsupported,
}

impl ArtifactKind {
    /// Declared MIME type wins unless it is missing or the generic
    /// `application/octet-stream`, in which case the file extension decides.
    pub fn classify(content_type: Option<&str>, file_name: Option<&str>) -> Self {
        let declared = content_type.and_then(|raw| raw.parse::<Mime>().ok());

        match declared {
            Some(mime) if mime.essence_str() != mime::APPLICATION_OCTET_STREAM.essence_str() => {
                Self::from_mime(&mime)
            }
            _ => file_name
                .and_then(Self::from_extension)
                .unwrap_or(Self::Text),
        }
    }

    fn from_mime(mime: &Mime) -> Self {
        let top = mime.type_();
        if top == mime::IMAGE {
            Self::Image
        } else if top == mime::TEXT {
            Self::Text
        } else {
            Self::Unsupported
        }
    }

    fn from_extension(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();

        match extension.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "tif" | "tiff" | "webp" => Some(Self::Image),
            "txt" | "text" | "md" | "csv" => Some(Self::Text),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Text => "text",
            Self::Unsupported => "unsupported",
        }
    }
}
