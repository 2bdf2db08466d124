//! Accessibility settings and the preferred UI language, persisted
//! wholesale as two keys of one small JSON file. The translation tables
//! and narration that consume these values live outside this service.

pub mod handlers;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;

use crate::errors::AppError;

/// Visual adjustment values, all applied client-side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilitySettings {
    /// Percent.
    pub contrast: u32,
    /// Percent.
    pub saturation: u32,
    /// Percent of the base font size.
    pub text_size: u32,
    /// Pixels.
    pub letter_spacing: i32,
    /// Pixels.
    pub cursor_size: u32,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        AccessibilitySettings {
            contrast: 100,
            saturation: 100,
            text_size: 100,
            letter_spacing: 0,
            cursor_size: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Mr,
    Ta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PrefsData {
    #[serde(rename = "accessibility-settings", default)]
    accessibility: AccessibilitySettings,
    #[serde(rename = "preferred-language", default)]
    language: Language,
}

pub struct Preferences {
    path: PathBuf,
    data: RwLock<PrefsData>,
}

impl Preferences {
    /// Loads the preferences file; missing or unreadable content falls
    /// back to defaults (an unknown language code counts as unreadable).
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!("Discarding malformed preferences file: {e}");
                PrefsData::default()
            }),
            Err(_) => PrefsData::default(),
        };
        Preferences {
            path,
            data: RwLock::new(data),
        }
    }

    pub async fn accessibility(&self) -> AccessibilitySettings {
        self.data.read().await.accessibility
    }

    pub async fn language(&self) -> Language {
        self.data.read().await.language
    }

    pub async fn set_accessibility(
        &self,
        settings: AccessibilitySettings,
    ) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        data.accessibility = settings;
        self.persist(&data).await
    }

    pub async fn set_language(&self, language: Language) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        data.language = language;
        self.persist(&data).await
    }

    async fn persist(&self, data: &PrefsData) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(anyhow::Error::from)?;
        }
        let bytes = serde_json::to_vec_pretty(data).map_err(anyhow::Error::from)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(anyhow::Error::from)?;
        Ok(())
    }
}
