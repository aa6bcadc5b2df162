mod concept;
mod favorites;
mod front_matter;
mod ids;
mod note;
mod progress;
mod quiz;
mod settings;
mod study;

pub use concept::{
    CONCEPT_SECTION_HEADINGS, Concept, ConceptDocument, concept_id, extract_concepts,
};
pub use favorites::{Bookmark, ConceptFavorite};
pub use front_matter::{FrontMatter, FrontValue, split_front_matter};
pub use ids::RecordId;
pub use note::{Note, NoteMap};
pub use progress::{
    COMPLETE_PERCENTAGE, ProgressMap, ProgressRecord, QuizResult, Statistics,
    concept_progress_key, is_concept_key,
};
pub use quiz::{
    Answer, Difficulty, Question, Quiz, QuizFormatError, ScoreClass, ScoreTier,
    calculate_results, score_percentage,
};
pub use settings::Settings;
pub use study::{StudySession, study_streak};
