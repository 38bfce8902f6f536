use serde::{Deserialize, Serialize};

use crate::error::{validation, AppResult};

/// A listed item.
///
/// `id` stays out of the JSON payload; clients address items through the
/// `/items/{id}` path only. `image` is omitted when no image was stored, and
/// always omitted in search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(skip)]
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub keyword: String,
}

/// Where the image for a new item comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A path on the server's filesystem (urlencoded `image=<path>`).
    LocalPath(String),
    /// File part of a multipart upload.
    Upload { file_name: String, bytes: Vec<u8> },
}

impl ImageSource {
    /// The reference as the client submitted it, echoed in the confirmation message.
    pub fn reference(&self) -> &str {
        match self {
            ImageSource::LocalPath(path) => path,
            ImageSource::Upload { file_name, .. } => file_name,
        }
    }
}

/// Urlencoded body of `POST /items`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// A validated add-item request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub image: Option<ImageSource>,
}

impl NewItem {
    pub fn validate(self) -> AppResult<Self> {
        validation::validate_required(&self.name, "name")?;
        validation::validate_required(&self.category, "category")?;
        Ok(self)
    }

    /// `item received: <name>, <category>[, <image>]`
    pub fn confirmation(&self) -> String {
        match &self.image {
            Some(source) => format!(
                "item received: {}, {}, {}",
                self.name,
                self.category,
                source.reference()
            ),
            None => format!("item received: {}, {}", self.name, self.category),
        }
    }
}

impl From<NewItemForm> for NewItem {
    fn from(form: NewItemForm) -> Self {
        Self {
            name: form.name,
            category: form.category,
            // An empty `image=` field means "no image"
            image: form
                .image
                .filter(|path| !path.trim().is_empty())
                .map(ImageSource::LocalPath),
        }
    }
}
