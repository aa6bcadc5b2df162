use std::sync::Arc;

use serde::{Deserialize, Serialize};
use storage::StorageManager;
use tracing::debug;

use crate::catalog::ROADMAP_FILE;
use crate::content::ContentSource;
use crate::error::RoadmapError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapModule {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_hours: f32,
    pub route: String,
    #[serde(default)]
    pub quiz_route: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub modules: Vec<RoadmapModule>,
}

/// A roadmap module joined with the learner's progress on its route.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleStatus {
    pub module: RoadmapModule,
    pub progress: u8,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapView {
    pub modules: Vec<ModuleStatus>,
    pub completed_count: usize,
    /// Minutes.
    pub study_time: u64,
    pub quiz_average: u8,
}

/// Load `data/roadmap.json` and annotate each module with stored progress.
///
/// # Errors
///
/// Returns `RoadmapError` when the file is missing or malformed, or when
/// progress cannot be read.
pub async fn load_roadmap(
    source: &Arc<dyn ContentSource>,
    storage: &StorageManager,
) -> Result<RoadmapView, RoadmapError> {
    let raw = source.fetch_text(ROADMAP_FILE).await?;
    let roadmap: Roadmap = serde_json::from_str(&raw)?;
    debug!(modules = roadmap.modules.len(), "roadmap loaded");

    let progress = storage.progress_map().await?;
    let modules = roadmap
        .modules
        .into_iter()
        .map(|module| {
            let record = progress.get(&module.route);
            ModuleStatus {
                progress: record.map_or(0, |r| r.completion_percentage),
                completed: record.is_some_and(|r| r.is_complete()),
                module,
            }
        })
        .collect();

    Ok(RoadmapView {
        modules,
        completed_count: storage.completed_count().await?,
        study_time: storage.total_study_time().await?,
        quiz_average: storage.quiz_average().await?,
    })
}
