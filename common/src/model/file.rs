use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// A file picked by the user, already read into memory.
///
/// Every selection gets a fresh `id`, so picking the same file twice still
/// counts as a new selection. Cloning is cheap: the bytes are shared.
#[derive(Clone)]
pub struct FileHandle {
    id: Uuid,
    name: String,
    content_type: String,
    bytes: Arc<[u8]>,
}

impl FileHandle {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Original file name as reported by the browser. Informational only.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl PartialEq for FileHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FileHandle {}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Fixed single-file upload slots. A slot holds at most one file; selecting
/// again replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileSlot {
    LeadImage,
    AadhaarFront,
    AadhaarBack,
    Pan,
    GstCertificate,
}

impl FileSlot {
    /// Multipart field name the slot is attached under.
    pub fn field_name(self) -> &'static str {
        match self {
            FileSlot::LeadImage => "leadImage",
            FileSlot::AadhaarFront => "aadhaarFront",
            FileSlot::AadhaarBack => "aadhaarBack",
            FileSlot::Pan => "pan",
            FileSlot::GstCertificate => "gstCertificate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileSlot::LeadImage => "Upload Photo",
            FileSlot::AadhaarFront => "Upload Aadhaar Front",
            FileSlot::AadhaarBack => "Upload Aadhaar Back",
            FileSlot::Pan => "Upload PAN Card",
            FileSlot::GstCertificate => "Upload GST Certificate",
        }
    }
}
