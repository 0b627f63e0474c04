//! Image description: label detection plus best-effort translation.
//!
//! The vision call is authoritative: if it fails, the request fails. The
//! translation call is best-effort: on any failure the untranslated labels
//! are substituted inline, within the same request, with no retry.

mod translate;
mod vision;

use base64::{Engine as _, engine::general_purpose};
use std::collections::HashSet;
use tracing::warn;

use crate::config::{TranslationConfig, VisionConfig};
use crate::errors::{Error, Result};
pub use translate::TranslationClient;
pub use vision::{LabelAnnotation, VisionClient};

/// At most this many labels survive compaction into a description.
const DESCRIPTION_LABELS: usize = 5;
/// Distinct labels scanned before compaction stops.
const SCAN_CAP: usize = 30;

pub struct DescriptionService {
    vision: VisionClient,
    translation: TranslationClient,
}

impl DescriptionService {
    pub fn new(vision: &VisionConfig, translation: &TranslationConfig) -> Self {
        Self {
            vision: VisionClient::new(vision),
            translation: TranslationClient::new(translation),
        }
    }

    /// Produce a short description for a base64 (or data URL) image payload.
    pub async fn describe(&self, image_payload: &str) -> Result<String> {
        let image = decode_image(image_payload)?;

        let annotations = self.vision.detect_labels(&image).await.map_err(Error::Other)?;
        let labels = compact_labels(annotations);
        if labels.is_empty() {
            return Ok("no objects recognized".to_string());
        }

        let translated = match self.translation.translate(&labels).await {
            Ok(translated) if !translated.is_empty() => translated,
            Ok(_) => labels.clone(),
            Err(e) => {
                // Degraded fallback: keep the untranslated labels
                warn!(error = %e, "Label translation failed, using untranslated labels");
                labels.clone()
            }
        };

        Ok(translated.join(", "))
    }
}

/// Decode a plain base64 payload or a `data:*;base64,` URL.
pub fn decode_image(payload: &str) -> Result<Vec<u8>> {
    let encoded = match payload.strip_prefix("data:") {
        Some(rest) => rest.split_once(";base64,").map(|(_, data)| data).unwrap_or(rest),
        None => payload,
    };

    general_purpose::STANDARD.decode(encoded.trim()).map_err(|_| Error::BadRequest {
        message: "image must be base64 encoded".to_string(),
    })
}

/// Keep the highest-scoring distinct labels, case-insensitively deduplicated,
/// capped at [`DESCRIPTION_LABELS`].
pub fn compact_labels(mut annotations: Vec<LabelAnnotation>) -> Vec<String> {
    annotations.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    let mut seen = HashSet::new();
    let mut labels = Vec::new();
    for annotation in annotations {
        let text = annotation.description.trim();
        if !text.is_empty() && seen.insert(text.to_lowercase()) {
            labels.push(text.to_string());
        }
        if labels.len() >= SCAN_CAP {
            break;
        }
    }

    labels.truncate(DESCRIPTION_LABELS);
    labels
}
