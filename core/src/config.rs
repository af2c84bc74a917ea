use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::preview::DEFAULT_IMAGE_NAME;

pub const DEFAULT_IMAGE_MODAL_ID: &str = "imageModal";
pub const DEFAULT_CHOOSER_MODAL_ID: &str = "setProfilePictureModal";
pub const DEFAULT_SECTION_ID: &str = "profile-picture-section";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub preview_title: String,
    pub download: String,
    pub close: String,
    pub loading: String,
    pub submitting: String,
    pub error: String,
    pub refresh: String,
    /// Name shown for images whose marker has no `data-image-name`.
    pub default_image_name: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            preview_title: "Просмотр изображения".to_string(),
            download: "Скачать".to_string(),
            close: "Закрыть".to_string(),
            loading: "Загрузка...".to_string(),
            submitting: "Установка основного изображения...".to_string(),
            error: "Ошибка при установке основного изображения".to_string(),
            refresh: "Обновить".to_string(),
            default_image_name: DEFAULT_IMAGE_NAME.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub image_modal_id: String,
    pub chooser_modal_id: String,
    pub section_id: String,
    pub labels: Labels,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            image_modal_id: DEFAULT_IMAGE_MODAL_ID.to_string(),
            chooser_modal_id: DEFAULT_CHOOSER_MODAL_ID.to_string(),
            section_id: DEFAULT_SECTION_ID.to_string(),
            labels: Labels::default(),
        }
    }
}

impl ViewerConfig {
    /// Parses a partial config; absent fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(trimmed)?)
    }
}
