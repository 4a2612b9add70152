use serde::{Deserialize, Serialize};

/// Largest accepted photo, in bytes (3 MB).
pub const MAX_PHOTO_SIZE: u64 = 3_145_728;

/// Content types accepted by the photo step.
pub const ACCEPTED_PHOTO_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

const ACCEPTED_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "gif"];

/// Metadata of a photo attached to a draft.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoAttachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: u64,
}

impl PhotoAttachment {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            size,
        }
    }

    /// Returns the reason this attachment is refused, if any.
    pub fn rejection(&self) -> Option<String> {
        if self.size > MAX_PHOTO_SIZE {
            return Some(format!("{} is larger than 3 MB", self.file_name));
        }
        if !self.has_accepted_type() {
            return Some(format!(
                "{} must be a *.jpeg, *.jpg, *.png or *.gif image",
                self.file_name
            ));
        }
        None
    }

    fn has_accepted_type(&self) -> bool {
        match self.content_type.as_deref() {
            Some(content_type) => ACCEPTED_PHOTO_TYPES.contains(&content_type),
            None => self
                .file_name
                .rsplit_once('.')
                .map(|(_, ext)| ACCEPTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false),
        }
    }
}
