//! Scene Store row type and the assembled notification document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the Scene Store, keyed by `(pipeline_id, scene_number)`.
/// Created lazily on first write of any field; subsequent writes update
/// only the named field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneResult {
    pub scene_number: i32,
    pub mood: Option<String>,
    pub scene_story: Option<String>,
    pub scene_image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// One entry of the assembled notification document's `pageList`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageEntry {
    pub page_index: i32,
    pub mood: Option<String>,
    pub story: Option<String>,
    pub image_url: Option<String>,
}

impl From<SceneResult> for PageEntry {
    fn from(row: SceneResult) -> Self {
        PageEntry {
            page_index: row.scene_number,
            mood: row.mood,
            story: row.scene_story,
            image_url: row.scene_image_url,
        }
    }
}

/// The document the Terminal Notifier POSTs downstream: §4.7.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotifyDocument {
    pub pipeline_id: String,
    pub status: String,
    pub page_list: Vec<PageEntry>,
}

impl NotifyDocument {
    /// Assemble from Scene Store rows already ordered ascending by
    /// `scene_number` (§4.2's `assemble`).
    pub fn assemble(pipeline_id: impl Into<String>, rows: Vec<SceneResult>) -> Self {
        Self {
            pipeline_id: pipeline_id.into(),
            status: "completed".to_string(),
            page_list: rows.into_iter().map(PageEntry::from).collect(),
        }
    }
}
