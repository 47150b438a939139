//! Image picking for the profile picture and cover photo steps.
//!
//! Platform pickers implement [`ImagePicker`]. [`pick_image`] folds their
//! result into a [`PickOutcome`]: a denied permission becomes a dismissible
//! prompt and the step simply continues without an image.

use async_trait::async_trait;
use base64::Engine;
use dioxus::html::FileEngine;
use std::sync::Arc;
use thiserror::Error;

use crate::{console_info, console_warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("Access to the photo library was denied")]
    PermissionDenied { can_open_settings: bool },

    #[error("Image selection was cancelled")]
    Cancelled,

    #[error("Unsupported file type: {mime_type}")]
    Unsupported { mime_type: String },

    #[error("Failed to read image: {message}")]
    Failed { message: String },
}

/// Image bytes chosen by the user
#[derive(Debug, Clone, PartialEq)]
pub struct PickedImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl PickedImage {
    /// Build from a file name and contents, rejecting non-image files
    pub fn from_file(file_name: &str, bytes: Vec<u8>) -> Result<Self, MediaError> {
        let mime_type = mime_from_name(file_name);
        if !mime_type.starts_with("image/") {
            return Err(MediaError::Unsupported { mime_type });
        }
        Ok(Self {
            file_name: file_name.to_string(),
            mime_type,
            bytes,
        })
    }

    /// `data:` URL usable both as preview source and as the stored field value
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

fn mime_from_name(file_name: &str) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[async_trait(?Send)]
pub trait ImagePicker {
    /// `Ok(None)` when the user closed the picker without choosing
    async fn pick(&self) -> Result<Option<PickedImage>, MediaError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    Selected(PickedImage),
    NoSelection,
    PermissionPrompt {
        message: String,
        can_open_settings: bool,
    },
}

pub async fn pick_image(picker: &dyn ImagePicker) -> PickOutcome {
    match picker.pick().await {
        Ok(Some(image)) => {
            console_info!("[Media] Selected {} ({} bytes)", image.file_name, image.bytes.len());
            PickOutcome::Selected(image)
        }
        Ok(None) | Err(MediaError::Cancelled) => PickOutcome::NoSelection,
        Err(MediaError::PermissionDenied { can_open_settings }) => PickOutcome::PermissionPrompt {
            message: "Allow photo access in your settings to choose an image.".to_string(),
            can_open_settings,
        },
        Err(e) => {
            console_warn!("[Media] {}", e);
            PickOutcome::NoSelection
        }
    }
}

/// Picker over the files of a browser `<input type="file">` change event
pub struct FileInputPicker {
    engine: Option<Arc<dyn FileEngine>>,
}

impl FileInputPicker {
    pub fn new(engine: Option<Arc<dyn FileEngine>>) -> Self {
        Self { engine }
    }
}

#[async_trait(?Send)]
impl ImagePicker for FileInputPicker {
    async fn pick(&self) -> Result<Option<PickedImage>, MediaError> {
        let Some(engine) = &self.engine else {
            return Ok(None);
        };
        let Some(file_name) = engine.files().into_iter().next() else {
            return Ok(None);
        };
        let bytes = engine
            .read_file(&file_name)
            .await
            .ok_or_else(|| MediaError::Failed {
                message: format!("could not read {}", file_name),
            })?;
        PickedImage::from_file(&file_name, bytes).map(Some)
    }
}
