//! Typed collections over a [`KeyValueStore`].
//!
//! Every collection is one JSON blob under a fixed key. Missing or malformed
//! blobs read back as the empty default; the fallback is logged, never
//! returned as an error. Read-modify-write operations are serialized through
//! one async lock so concurrent callers cannot lose updates.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use prep_core::Clock;
use prep_core::model::{
    Bookmark, ConceptFavorite, Note, NoteMap, ProgressMap, ProgressRecord, QuizResult, RecordId,
    Settings, Statistics, StudySession, concept_id, concept_progress_key, is_concept_key,
    score_percentage, study_streak,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::repository::{KeyValueStore, Storage, StorageError};

/// Fixed storage keys, one per collection.
pub mod keys {
    pub const PROGRESS: &str = "software_dev_prep_progress";
    pub const QUIZ_RESULTS: &str = "software_dev_prep_quiz_results";
    pub const BOOKMARKS: &str = "software_dev_prep_bookmarks";
    pub const CONCEPT_FAVORITES: &str = "software_dev_prep_concept_favorites";
    pub const SETTINGS: &str = "software_dev_prep_settings";
    pub const STUDY_SESSIONS: &str = "software_dev_prep_study_sessions";
    pub const NOTES: &str = "software_dev_prep_notes";
    pub const CURRENT_STUDY_SESSION: &str = "current_study_session";

    pub const ALL: [&str; 8] = [
        PROGRESS,
        QUIZ_RESULTS,
        BOOKMARKS,
        CONCEPT_FAVORITES,
        SETTINGS,
        STUDY_SESSIONS,
        NOTES,
        CURRENT_STUDY_SESSION,
    ];
}

/// Most recent quiz results kept.
pub const QUIZ_RESULT_LIMIT: usize = 50;
/// Most recent finished study sessions kept.
pub const STUDY_SESSION_LIMIT: usize = 100;

const EXPORT_VERSION: &str = "1.0";

/// Portable snapshot of all persisted collections.
///
/// On import, absent collections are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_results: Option<Vec<QuizResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmarks: Option<Vec<Bookmark>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept_favorites: Option<Vec<ConceptFavorite>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_sessions: Option<Vec<StudySession>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<NoteMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Clone)]
pub struct StorageManager {
    store: Arc<dyn KeyValueStore>,
    clock: Clock,
    writes: Arc<Mutex<()>>,
}

impl StorageManager {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Clock) -> Self {
        Self {
            store,
            clock,
            writes: Arc::new(Mutex::new(())),
        }
    }

    /// Manager over a fresh in-memory store.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(Storage::in_memory().store, clock)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Seed default settings when none are stored yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn init(&self) -> Result<(), StorageError> {
        let _guard = self.writes.lock().await;
        if self.store.get(keys::SETTINGS).await?.is_none() {
            self.write_json(keys::SETTINGS, &Settings::default()).await?;
            debug!("seeded default settings");
        }
        Ok(())
    }

    // ─── Progress ──────────────────────────────────────────────────────────

    /// Record a visit to `route`, overwriting its completion percentage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn save_progress(
        &self,
        route: &str,
        completion_percentage: u8,
    ) -> Result<ProgressRecord, StorageError> {
        let _guard = self.writes.lock().await;
        let mut map: ProgressMap = self.read_json(keys::PROGRESS).await?;
        let record = ProgressRecord::visited(
            map.get(route),
            route,
            completion_percentage,
            self.clock.now(),
        );
        map.insert(route.to_string(), record.clone());
        self.write_json(keys::PROGRESS, &map).await?;
        Ok(record)
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn mark_as_read(&self, route: &str) -> Result<ProgressRecord, StorageError> {
        self.save_progress(route, 100).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn mark_as_completed(&self, route: &str) -> Result<ProgressRecord, StorageError> {
        self.save_progress(route, 100).await
    }

    /// Completion percentage of `route`, zero if never visited.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn progress(&self, route: &str) -> Result<u8, StorageError> {
        let map = self.progress_map().await?;
        Ok(map.get(route).map_or(0, |r| r.completion_percentage))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn progress_map(&self) -> Result<ProgressMap, StorageError> {
        self.read_json(keys::PROGRESS).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn is_completed(&self, route: &str) -> Result<bool, StorageError> {
        Ok(self.progress(route).await? >= 100)
    }

    /// Completed entries, concept read flags included.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn completed_count(&self) -> Result<usize, StorageError> {
        let map = self.progress_map().await?;
        Ok(map.values().filter(|r| r.is_complete()).count())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn clear_progress(&self) -> Result<(), StorageError> {
        let _guard = self.writes.lock().await;
        self.store.remove(keys::PROGRESS).await
    }

    // ─── Concept read flags ────────────────────────────────────────────────

    /// Set or clear the read flag of one concept on the page at `route`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn set_concept_read(
        &self,
        route: &str,
        anchor: &str,
        read: bool,
    ) -> Result<(), StorageError> {
        let key = concept_progress_key(route, anchor);
        if read {
            self.save_progress(&key, 100).await?;
            return Ok(());
        }
        let _guard = self.writes.lock().await;
        let mut map: ProgressMap = self.read_json(keys::PROGRESS).await?;
        if map.remove(&key).is_some() {
            self.write_json(keys::PROGRESS, &map).await?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn is_concept_read(&self, route: &str, anchor: &str) -> Result<bool, StorageError> {
        self.is_completed(&concept_progress_key(route, anchor)).await
    }

    /// Anchors among `anchors` whose concepts are marked read.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn read_concepts<'a>(
        &self,
        route: &str,
        anchors: impl IntoIterator<Item = &'a str>,
    ) -> Result<BTreeSet<String>, StorageError> {
        let map = self.progress_map().await?;
        Ok(anchors
            .into_iter()
            .filter(|anchor| {
                map.get(&concept_progress_key(route, anchor))
                    .is_some_and(ProgressRecord::is_complete)
            })
            .map(str::to_string)
            .collect())
    }

    // ─── Quiz results ──────────────────────────────────────────────────────

    /// Append a result, keeping only the most recent [`QUIZ_RESULT_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn save_quiz_result(&self, result: QuizResult) -> Result<(), StorageError> {
        let _guard = self.writes.lock().await;
        let mut results: Vec<QuizResult> = self.read_json(keys::QUIZ_RESULTS).await?;
        results.push(result);
        keep_last(&mut results, QUIZ_RESULT_LIMIT);
        self.write_json(keys::QUIZ_RESULTS, &results).await
    }

    /// All results, or only those of the quiz titled `quiz`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn quiz_results(&self, quiz: Option<&str>) -> Result<Vec<QuizResult>, StorageError> {
        let mut results: Vec<QuizResult> = self.read_json(keys::QUIZ_RESULTS).await?;
        if let Some(title) = quiz {
            results.retain(|r| r.quiz == title);
        }
        Ok(results)
    }

    /// Rounded mean score over all results, zero when there are none.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn quiz_average(&self) -> Result<u8, StorageError> {
        let results = self.quiz_results(None).await?;
        Ok(rounded_mean(results.iter().map(|r| r.score)))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn best_quiz_score(&self, quiz: &str) -> Result<u8, StorageError> {
        let results = self.quiz_results(Some(quiz)).await?;
        Ok(results.iter().map(|r| r.score).max().unwrap_or(0))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn clear_quiz_results(&self) -> Result<(), StorageError> {
        let _guard = self.writes.lock().await;
        self.store.remove(keys::QUIZ_RESULTS).await
    }

    // ─── Bookmarks ─────────────────────────────────────────────────────────

    /// Bookmark `route`. Returns false if it was already bookmarked.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn add_bookmark(
        &self,
        route: &str,
        title: &str,
        description: &str,
    ) -> Result<bool, StorageError> {
        let _guard = self.writes.lock().await;
        let mut bookmarks: Vec<Bookmark> = self.read_json(keys::BOOKMARKS).await?;
        if bookmarks.iter().any(|b| b.route == route) {
            return Ok(false);
        }
        bookmarks.push(self.new_bookmark(route, title, description));
        self.write_json(keys::BOOKMARKS, &bookmarks).await?;
        Ok(true)
    }

    fn new_bookmark(&self, route: &str, title: &str, description: &str) -> Bookmark {
        Bookmark {
            id: RecordId::generate(),
            route: route.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            added_at: self.clock.now(),
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn remove_bookmark(&self, route: &str) -> Result<(), StorageError> {
        let _guard = self.writes.lock().await;
        let mut bookmarks: Vec<Bookmark> = self.read_json(keys::BOOKMARKS).await?;
        bookmarks.retain(|b| b.route != route);
        self.write_json(keys::BOOKMARKS, &bookmarks).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn bookmarks(&self) -> Result<Vec<Bookmark>, StorageError> {
        self.read_json(keys::BOOKMARKS).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn is_bookmarked(&self, route: &str) -> Result<bool, StorageError> {
        Ok(self.bookmarks().await?.iter().any(|b| b.route == route))
    }

    /// Flip the bookmark on `route`. Returns whether it is bookmarked now.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn toggle_bookmark(
        &self,
        route: &str,
        title: &str,
        description: &str,
    ) -> Result<bool, StorageError> {
        let _guard = self.writes.lock().await;
        let mut bookmarks: Vec<Bookmark> = self.read_json(keys::BOOKMARKS).await?;
        let before = bookmarks.len();
        bookmarks.retain(|b| b.route != route);
        let now_bookmarked = bookmarks.len() == before;
        if now_bookmarked {
            bookmarks.push(self.new_bookmark(route, title, description));
        }
        self.write_json(keys::BOOKMARKS, &bookmarks).await?;
        Ok(now_bookmarked)
    }

    // ─── Concept favorites ─────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn concept_favorites(&self) -> Result<Vec<ConceptFavorite>, StorageError> {
        self.read_json(keys::CONCEPT_FAVORITES).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn is_concept_favorite(&self, topic: &str, anchor: &str) -> Result<bool, StorageError> {
        let id = concept_id(topic, anchor);
        Ok(self.concept_favorites().await?.iter().any(|f| f.id == id))
    }

    /// Flip the favorite flag of a concept. Returns whether it is a favorite now.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn toggle_concept_favorite(
        &self,
        topic: &str,
        anchor: &str,
        title: &str,
    ) -> Result<bool, StorageError> {
        let _guard = self.writes.lock().await;
        let mut favorites: Vec<ConceptFavorite> = self.read_json(keys::CONCEPT_FAVORITES).await?;
        let id = concept_id(topic, anchor);
        let before = favorites.len();
        favorites.retain(|f| f.id != id);
        let now_favorite = favorites.len() == before;
        if now_favorite {
            favorites.push(ConceptFavorite::new(topic, anchor, title, self.clock.now()));
        }
        self.write_json(keys::CONCEPT_FAVORITES, &favorites).await?;
        Ok(now_favorite)
    }

    // ─── Study sessions ────────────────────────────────────────────────────

    /// Open a session on `route`, replacing any session still in progress.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn start_study_session(
        &self,
        route: &str,
        title: &str,
    ) -> Result<StudySession, StorageError> {
        let _guard = self.writes.lock().await;
        let session = StudySession::start(route, title, self.clock.now());
        self.write_json(keys::CURRENT_STUDY_SESSION, &session).await?;
        Ok(session)
    }

    /// Close the session in progress and append it to the history.
    ///
    /// Returns `None` if no session was open.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn end_study_session(&self) -> Result<Option<StudySession>, StorageError> {
        let _guard = self.writes.lock().await;
        let current: Option<StudySession> = self.read_json(keys::CURRENT_STUDY_SESSION).await?;
        let Some(current) = current else {
            return Ok(None);
        };
        let finished = current.finish(self.clock.now());

        let mut sessions: Vec<StudySession> = self.read_json(keys::STUDY_SESSIONS).await?;
        sessions.push(finished.clone());
        keep_last(&mut sessions, STUDY_SESSION_LIMIT);
        self.write_json(keys::STUDY_SESSIONS, &sessions).await?;
        self.store.remove(keys::CURRENT_STUDY_SESSION).await?;
        Ok(Some(finished))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn study_sessions(&self) -> Result<Vec<StudySession>, StorageError> {
        self.read_json(keys::STUDY_SESSIONS).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn current_study_session(&self) -> Result<Option<StudySession>, StorageError> {
        self.read_json(keys::CURRENT_STUDY_SESSION).await
    }

    /// Sum of finished session durations, in minutes.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn total_study_time(&self) -> Result<u64, StorageError> {
        let sessions = self.study_sessions().await?;
        Ok(sessions.iter().map(|s| u64::from(s.duration)).sum())
    }

    // ─── Settings ──────────────────────────────────────────────────────────

    /// Stored settings merged over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn settings(&self) -> Result<Settings, StorageError> {
        self.read_json(keys::SETTINGS).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        let _guard = self.writes.lock().await;
        self.write_json(keys::SETTINGS, settings).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn setting(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.settings().await?.get(key))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn save_setting(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let _guard = self.writes.lock().await;
        let mut settings: Settings = self.read_json(keys::SETTINGS).await?;
        settings.set(key, value);
        self.write_json(keys::SETTINGS, &settings).await
    }

    // ─── Notes ─────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn save_note(&self, route: &str, content: &str) -> Result<(), StorageError> {
        let _guard = self.writes.lock().await;
        let mut notes: NoteMap = self.read_json(keys::NOTES).await?;
        notes.insert(
            route.to_string(),
            Note {
                content: content.to_string(),
                last_modified: self.clock.now(),
            },
        );
        self.write_json(keys::NOTES, &notes).await
    }

    /// Note text for `route`, empty if none.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn note(&self, route: &str) -> Result<String, StorageError> {
        let notes = self.notes().await?;
        Ok(notes.get(route).map(|n| n.content.clone()).unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn notes(&self) -> Result<NoteMap, StorageError> {
        self.read_json(keys::NOTES).await
    }

    // ─── Statistics ────────────────────────────────────────────────────────

    /// Aggregates over page progress (concept flags excluded), quizzes and sessions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn statistics(&self) -> Result<Statistics, StorageError> {
        let progress = self.progress_map().await?;
        let results = self.quiz_results(None).await?;
        let sessions = self.study_sessions().await?;

        let pages: Vec<&ProgressRecord> = progress
            .iter()
            .filter(|(key, _)| !is_concept_key(key))
            .map(|(_, record)| record)
            .collect();
        let total_routes = pages.len();
        let completed_routes = pages.iter().filter(|r| r.is_complete()).count();

        let last_activity = progress
            .values()
            .map(|r| r.last_visited)
            .chain(results.iter().map(|r| r.date))
            .max();

        Ok(Statistics {
            total_routes,
            completed_routes,
            completion_percentage: score_percentage(completed_routes, total_routes),
            total_study_time: sessions.iter().map(|s| u64::from(s.duration)).sum(),
            total_quizzes: results.len(),
            average_quiz_score: rounded_mean(results.iter().map(|r| r.score)),
            study_streak: study_streak(&sessions, self.clock.today()),
            last_activity,
        })
    }

    /// Most recent progress visit or quiz attempt.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn last_activity(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        Ok(self.statistics().await?.last_activity)
    }

    // ─── Export / import ───────────────────────────────────────────────────

    /// Pretty-printed JSON snapshot of every collection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails or serialization fails.
    pub async fn export_data(&self) -> Result<String, StorageError> {
        let bundle = ExportBundle {
            progress: Some(self.progress_map().await?),
            quiz_results: Some(self.quiz_results(None).await?),
            bookmarks: Some(self.bookmarks().await?),
            concept_favorites: Some(self.concept_favorites().await?),
            study_sessions: Some(self.study_sessions().await?),
            settings: Some(self.settings().await?),
            notes: Some(self.notes().await?),
            export_date: Some(self.clock.now()),
            version: Some(EXPORT_VERSION.to_string()),
        };
        serde_json::to_string_pretty(&bundle)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Replace the collections present in `json`; absent ones are kept.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if `json` is not a valid export,
    /// in which case nothing is written.
    pub async fn import_data(&self, json: &str) -> Result<(), StorageError> {
        let bundle: ExportBundle =
            serde_json::from_str(json).map_err(|err| StorageError::Serialization(err.to_string()))?;

        let _guard = self.writes.lock().await;
        if let Some(progress) = &bundle.progress {
            self.write_json(keys::PROGRESS, progress).await?;
        }
        if let Some(mut results) = bundle.quiz_results {
            keep_last(&mut results, QUIZ_RESULT_LIMIT);
            self.write_json(keys::QUIZ_RESULTS, &results).await?;
        }
        if let Some(bookmarks) = &bundle.bookmarks {
            self.write_json(keys::BOOKMARKS, bookmarks).await?;
        }
        if let Some(favorites) = &bundle.concept_favorites {
            self.write_json(keys::CONCEPT_FAVORITES, favorites).await?;
        }
        if let Some(mut sessions) = bundle.study_sessions {
            keep_last(&mut sessions, STUDY_SESSION_LIMIT);
            self.write_json(keys::STUDY_SESSIONS, &sessions).await?;
        }
        if let Some(settings) = &bundle.settings {
            self.write_json(keys::SETTINGS, settings).await?;
        }
        if let Some(notes) = &bundle.notes {
            self.write_json(keys::NOTES, notes).await?;
        }
        debug!(version = ?bundle.version, "imported data");
        Ok(())
    }

    /// Remove every collection, including the session in progress.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub async fn clear_all_data(&self) -> Result<(), StorageError> {
        let _guard = self.writes.lock().await;
        for key in keys::ALL {
            self.store.remove(key).await?;
        }
        Ok(())
    }

    async fn read_json<T>(&self, key: &str) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(key, error = %err, "stored value is malformed; using empty default");
                Ok(T::default())
            }
        }
    }

    async fn write_json<T>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.store.set(key, &raw).await
    }
}

fn keep_last<T>(items: &mut Vec<T>, limit: usize) {
    if items.len() > limit {
        items.drain(..items.len() - limit);
    }
}

fn rounded_mean(values: impl Iterator<Item = u8>) -> u8 {
    let (sum, count) = values.fold((0_u64, 0_u64), |(sum, n), v| (sum + u64::from(v), n + 1));
    if count == 0 {
        return 0;
    }
    u8::try_from((sum * 2 + count) / (count * 2)).unwrap_or(u8::MAX)
}
