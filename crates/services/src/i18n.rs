//! Display strings for the supported interface languages.

use std::fmt;

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    Hu,
    #[default]
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Hu, Language::En];

    /// Match a language code or locale (`hu`, `en_US.UTF-8`, `hu-HU`) by its prefix.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let prefix: String = code
            .trim()
            .chars()
            .take_while(char::is_ascii_alphabetic)
            .collect::<String>()
            .to_ascii_lowercase();
        match prefix.as_str() {
            "hu" => Some(Self::Hu),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Hu => "hu",
            Self::En => "en",
        }
    }

    /// Path of the translated copy of a content document.
    ///
    /// Hungarian is the base language and maps to itself. Known content
    /// folders keep translations in a language subfolder
    /// (`theory/java.md` becomes `theory/en/java.md`); any other path gets
    /// the language inserted before the file name.
    #[must_use]
    pub fn localized_path(self, path: &str) -> String {
        if self == Self::Hu {
            return path.to_string();
        }
        let code = self.code();
        let (lead, rest) = match path.strip_prefix("./") {
            Some(rest) => ("./", rest),
            None => ("", path),
        };
        for dir in LOCALIZED_DIRS {
            if let Some(tail) = rest.strip_prefix(dir) {
                return format!("{lead}{dir}{code}/{tail}");
            }
        }
        match rest.rsplit_once('/') {
            Some((parent, file)) => format!("{lead}{parent}/{code}/{file}"),
            None => format!("{lead}{code}/{rest}"),
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Hu => HU,
            Self::En => EN,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Content folders whose translations live in a per-language subfolder.
const LOCALIZED_DIRS: [&str; 4] = ["theory/", "data/", "exercises/", "checklists/"];

/// Lookup over the static translation tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct I18n {
    language: Language,
}

impl I18n {
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Pick the language from the saved setting, else the locale, else English.
    #[must_use]
    pub fn resolve(setting: Option<&str>, locale: Option<&str>) -> Self {
        let language = setting
            .and_then(Language::from_code)
            .or_else(|| locale.and_then(Language::from_code))
            .unwrap_or_default();
        Self { language }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Path of `path` in the active language, see [`Language::localized_path`].
    #[must_use]
    pub fn localized_path(&self, path: &str) -> String {
        self.language.localized_path(path)
    }

    /// Translate `key`, falling back to English and then to the key itself.
    #[must_use]
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        lookup(self.language.table(), key)
            .or_else(|| lookup(EN, key))
            .unwrap_or(key)
    }

    /// Translate `key` and substitute `{name}` placeholders.
    #[must_use]
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.t(key).to_string();
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

const HU: &[(&str, &str)] = &[
    ("site.title", "Software Dev Prep"),
    ("nav.theory", "📚 Elmélet"),
    ("nav.exercises", "💻 Gyakorlat"),
    ("nav.quiz", "🧩 Kvíz"),
    ("nav.checklists", "✅ Segédletek"),
    ("nav.roadmap", "🗺️ Roadmap"),
    ("nav.favorites", "★ Kedvencek"),
    ("nav.progress", "📊 Haladás"),
    ("nav.toggle", "Navigáció megnyitása"),
    ("nav.tools", "🧭 Eszközök"),
    ("search.placeholder", "🔍 Keresés..."),
    ("search.title", "🔍 Keresési eredmények"),
    ("search.query", "Keresés: \"{query}\""),
    ("search.empty", "Nincs találat."),
    ("search.prompt", "Írj be egy keresőkifejezést."),
    ("difficulty.beginner", "Kezdő"),
    ("difficulty.intermediate", "Haladó"),
    ("difficulty.advanced", "Szakértő"),
    ("content.learningGoals", "🎯 Tanulási célok"),
    ("content.quickStart", "🚀 Gyors kezdés:"),
    ("content.minutes", "⏱️ {minutes} perc"),
    ("content.back", "← Vissza"),
    ("content.bookmark", "🔖 Mentés"),
    ("content.unbookmark", "🔖 Mentve"),
    ("content.unavailable.title", "Tartalom betöltési hiba"),
    ("content.unavailable.body", "A \"{title}\" tartalom jelenleg nem elérhető."),
    ("content.unavailable.details", "Részletek"),
    ("content.reload", "🔄 Újra"),
    ("theory.concepts", "Fogalmak"),
    ("theory.markRead", "Olvasottnak jelölöm"),
    ("theory.read", "✓ Elolvasva"),
    ("theory.favorite", "☆ Kedvenc"),
    ("theory.unfavorite", "★ Kedvenc"),
    ("theory.progress", "{read} / {total} fogalom elolvasva"),
    ("theory.previous", "← Előző fogalom"),
    ("theory.next", "Következő fogalom →"),
    ("quiz.question", "Kérdés"),
    ("quiz.questionOf", "{current}. kérdés / {total}"),
    ("quiz.previous", "← Előző"),
    ("quiz.next", "Következő →"),
    ("quiz.finish", "Befejezés"),
    ("quiz.true", "Igaz"),
    ("quiz.false", "Hamis"),
    ("quiz.noAnswer", "Nem válaszolt"),
    ("quiz.questions", "{count} kérdés"),
    ("quiz.estimatedTime", "~{minutes} perc"),
    ("quiz.results.title", "🎯 Kvíz eredmény"),
    ("quiz.results.correct", "Helyes válaszok:"),
    ("quiz.results.duration", "Időtartam:"),
    ("quiz.results.minutes", "{minutes} perc"),
    ("quiz.results.detailed", "📋 Részletes eredmények"),
    ("quiz.results.yourAnswer", "Te válaszod:"),
    ("quiz.results.correctAnswer", "Helyes válasz:"),
    ("quiz.results.explanation", "Magyarázat:"),
    ("quiz.results.retry", "🔄 Újra próbálkozás"),
    ("quiz.score.excellent", "🎉 Kiváló! Mester szinten ismered a témát!"),
    ("quiz.score.great", "👏 Nagyszerű munka! Jól megy neked ez a téma."),
    ("quiz.score.good", "👍 Jó eredmény! Még van mit tanulni, de jó úton jársz."),
    ("quiz.score.average", "📚 Átlagos eredmény. Érdemes még tanulmányozni a témát."),
    ("quiz.score.poor", "💪 Kezdő szint. Ne add fel, a gyakorlás teszi a mestert!"),
    ("quiz.score.veryPoor", "📖 Sok tanulnivaló van még. Nézd át újra az elméleti anyagot!"),
    ("roadmap.title", "🗺️ Tanulási Roadmap"),
    ("roadmap.intro", "Tervezd meg a felkészülési útvonalad a következő modulok alapján:"),
    ("roadmap.start", "Kezdés"),
    ("roadmap.quiz", "Teszt"),
    ("roadmap.hours", "⏱️ {hours}h"),
    ("roadmap.stats", "📊 Statisztikák"),
    ("stats.completed", "Befejezett modul"),
    ("stats.studyTime", "Tanulási idő"),
    ("stats.studyTimeValue", "{minutes} perc"),
    ("stats.quizAverage", "Kvíz átlag"),
    ("stats.quizzes", "Kitöltött kvíz"),
    ("stats.completion", "Teljesítés"),
    ("stats.streak", "Napos sorozat"),
    ("stats.lastActivity", "Utolsó aktivitás"),
    ("stats.never", "még nincs"),
    ("favorites.title", "★ Kedvencek"),
    ("favorites.pages", "🔖 Mentett oldalak"),
    ("favorites.concepts", "★ Kedvenc Fogalmak"),
    ("favorites.empty", "Még nincs kedvenced."),
    ("progress.title", "📊 Haladás"),
    ("progress.recentQuizzes", "Legutóbbi kvízek"),
    ("error.title", "❌ Hiba"),
    ("error.generic", "Hiba történt az oldal betöltése során."),
    ("error.notfound.title", "🔍 Oldal nem található"),
    ("error.notfound", "A keresett oldal nem létezik."),
    ("error.home", "Vissza a főoldalra"),
    ("loading", "Betöltés..."),
];

const EN: &[(&str, &str)] = &[
    ("site.title", "Software Dev Prep"),
    ("nav.theory", "📚 Theory"),
    ("nav.exercises", "💻 Exercises"),
    ("nav.quiz", "🧩 Quiz"),
    ("nav.checklists", "✅ Checklists"),
    ("nav.roadmap", "🗺️ Roadmap"),
    ("nav.favorites", "★ Favorites"),
    ("nav.progress", "📊 Progress"),
    ("nav.toggle", "Open navigation"),
    ("nav.tools", "🧭 Tools"),
    ("search.placeholder", "🔍 Search..."),
    ("search.title", "🔍 Search results"),
    ("search.query", "Search: \"{query}\""),
    ("search.empty", "No results."),
    ("search.prompt", "Type something to search for."),
    ("difficulty.beginner", "Beginner"),
    ("difficulty.intermediate", "Intermediate"),
    ("difficulty.advanced", "Advanced"),
    ("content.learningGoals", "🎯 Learning goals"),
    ("content.quickStart", "🚀 Quick start:"),
    ("content.minutes", "⏱️ {minutes} min"),
    ("content.back", "← Back"),
    ("content.bookmark", "🔖 Save"),
    ("content.unbookmark", "🔖 Saved"),
    ("content.unavailable.title", "Content loading error"),
    ("content.unavailable.body", "The \"{title}\" content is currently unavailable."),
    ("content.unavailable.details", "Details"),
    ("content.reload", "🔄 Retry"),
    ("theory.concepts", "Concepts"),
    ("theory.markRead", "Mark as read"),
    ("theory.read", "✓ Read"),
    ("theory.favorite", "☆ Favorite"),
    ("theory.unfavorite", "★ Favorite"),
    ("theory.progress", "{read} / {total} concepts read"),
    ("theory.previous", "← Previous concept"),
    ("theory.next", "Next concept →"),
    ("quiz.question", "Question"),
    ("quiz.questionOf", "Question {current} of {total}"),
    ("quiz.previous", "← Previous"),
    ("quiz.next", "Next →"),
    ("quiz.finish", "Finish"),
    ("quiz.true", "True"),
    ("quiz.false", "False"),
    ("quiz.noAnswer", "No answer"),
    ("quiz.questions", "{count} questions"),
    ("quiz.estimatedTime", "~{minutes} min"),
    ("quiz.results.title", "🎯 Quiz Results"),
    ("quiz.results.correct", "Correct answers:"),
    ("quiz.results.duration", "Duration:"),
    ("quiz.results.minutes", "{minutes} minutes"),
    ("quiz.results.detailed", "📋 Detailed Results"),
    ("quiz.results.yourAnswer", "Your answer:"),
    ("quiz.results.correctAnswer", "Correct answer:"),
    ("quiz.results.explanation", "Explanation:"),
    ("quiz.results.retry", "🔄 Try Again"),
    ("quiz.score.excellent", "🎉 Excellent! You have mastered this topic!"),
    ("quiz.score.great", "👏 Great work! You know this topic well."),
    ("quiz.score.good", "👍 Good result! Still things to learn, but you are on the right track."),
    ("quiz.score.average", "📚 Average result. Worth studying the topic a bit more."),
    ("quiz.score.poor", "💪 Beginner level. Don't give up, practice makes perfect!"),
    ("quiz.score.veryPoor", "📖 Plenty left to learn. Review the theory again!"),
    ("roadmap.title", "🗺️ Learning Roadmap"),
    ("roadmap.intro", "Plan your preparation path with the following modules:"),
    ("roadmap.start", "Start"),
    ("roadmap.quiz", "Quiz"),
    ("roadmap.hours", "⏱️ {hours}h"),
    ("roadmap.stats", "📊 Statistics"),
    ("stats.completed", "Completed modules"),
    ("stats.studyTime", "Study time"),
    ("stats.studyTimeValue", "{minutes} min"),
    ("stats.quizAverage", "Quiz average"),
    ("stats.quizzes", "Quizzes taken"),
    ("stats.completion", "Completion"),
    ("stats.streak", "Day streak"),
    ("stats.lastActivity", "Last activity"),
    ("stats.never", "none yet"),
    ("favorites.title", "★ Favorites"),
    ("favorites.pages", "🔖 Saved pages"),
    ("favorites.concepts", "★ Favorite Concepts"),
    ("favorites.empty", "No favorites yet."),
    ("progress.title", "📊 Progress"),
    ("progress.recentQuizzes", "Recent quizzes"),
    ("error.title", "❌ Error"),
    ("error.generic", "Something went wrong while loading the page."),
    ("error.notfound.title", "🔍 Page not found"),
    ("error.notfound", "The page you are looking for does not exist."),
    ("error.home", "Back to home"),
    ("loading", "Loading..."),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_uses_active_language() {
        let hu = I18n::new(Language::Hu);
        assert_eq!(hu.t("quiz.true"), "Igaz");
        assert_eq!(I18n::new(Language::En).t("quiz.true"), "True");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        let hu = I18n::new(Language::Hu);
        assert_eq!(hu.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn language_resolution_order() {
        assert_eq!(I18n::resolve(Some("hu"), Some("en_US.UTF-8")).language(), Language::Hu);
        assert_eq!(I18n::resolve(Some("fr"), Some("hu_HU.UTF-8")).language(), Language::Hu);
        assert_eq!(I18n::resolve(None, Some("de_DE")).language(), Language::En);
        assert_eq!(I18n::resolve(None, None).language(), Language::En);
    }

    #[test]
    fn localized_paths_follow_the_folder_layout() {
        let en = I18n::new(Language::En);
        let cases = [
            ("./theory/java.md", "./theory/en/java.md"),
            ("theory/java.md", "theory/en/java.md"),
            ("data/roadmap.json", "data/en/roadmap.json"),
            ("./data/quizzes/sql.json", "./data/en/quizzes/sql.json"),
            ("exercises/java/streams.md", "exercises/en/java/streams.md"),
            ("checklists/interview.md", "checklists/en/interview.md"),
            ("./docs/extra/notes.md", "./docs/extra/en/notes.md"),
            ("glossary.md", "en/glossary.md"),
        ];
        for (base, expected) in cases {
            assert_eq!(en.localized_path(base), expected, "for {base}");
        }
        assert_eq!(I18n::new(Language::Hu).localized_path("./theory/java.md"), "./theory/java.md");
    }

    #[test]
    fn placeholders_are_substituted() {
        let en = I18n::new(Language::En);
        assert_eq!(
            en.format("quiz.questionOf", &[("current", "2"), ("total", "4")]),
            "Question 2 of 4"
        );
    }

    #[test]
    fn both_tables_cover_the_same_keys() {
        let hu: Vec<_> = HU.iter().map(|(k, _)| *k).collect();
        let en: Vec<_> = EN.iter().map(|(k, _)| *k).collect();
        assert_eq!(hu, en);
    }
}
