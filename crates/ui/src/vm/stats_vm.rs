use prep_core::model::Statistics;
use services::{I18n, RoadmapView};

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCardVm {
    pub value: String,
    pub label: String,
}

fn card(value: String, label: &str, i18n: I18n) -> StatCardVm {
    StatCardVm {
        value,
        label: i18n.t(label).to_string(),
    }
}

fn minutes(value: u64, i18n: I18n) -> String {
    i18n.format("stats.studyTimeValue", &[("minutes", &value.to_string())])
}

#[must_use]
pub fn map_statistics(stats: &Statistics, i18n: I18n) -> Vec<StatCardVm> {
    let last_activity = stats
        .last_activity
        .map_or_else(|| i18n.t("stats.never").to_string(), format_datetime);

    vec![
        card(
            format!("{}/{}", stats.completed_routes, stats.total_routes),
            "stats.completed",
            i18n,
        ),
        card(
            format!("{}%", stats.completion_percentage),
            "stats.completion",
            i18n,
        ),
        card(minutes(stats.total_study_time, i18n), "stats.studyTime", i18n),
        card(stats.total_quizzes.to_string(), "stats.quizzes", i18n),
        card(
            format!("{}%", stats.average_quiz_score),
            "stats.quizAverage",
            i18n,
        ),
        card(stats.study_streak.to_string(), "stats.streak", i18n),
        card(last_activity, "stats.lastActivity", i18n),
    ]
}

/// The three summary cards under the roadmap.
#[must_use]
pub fn map_roadmap_stats(view: &RoadmapView, i18n: I18n) -> Vec<StatCardVm> {
    vec![
        card(
            format!("{}/{}", view.completed_count, view.modules.len()),
            "stats.completed",
            i18n,
        ),
        card(minutes(view.study_time, i18n), "stats.studyTime", i18n),
        card(format!("{}%", view.quiz_average), "stats.quizAverage", i18n),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::time::fixed_now;
    use services::Language;

    #[test]
    fn statistics_cards_format_values() {
        let stats = Statistics {
            total_routes: 4,
            completed_routes: 3,
            completion_percentage: 75,
            total_study_time: 42,
            total_quizzes: 2,
            average_quiz_score: 88,
            study_streak: 5,
            last_activity: Some(fixed_now()),
        };
        let cards = map_statistics(&stats, I18n::new(Language::En));
        let values: Vec<&str> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(
            values,
            ["3/4", "75%", "42 min", "2", "88%", "5", "2023-11-14 22:13"]
        );
        assert_eq!(cards[6].label, "Last activity");
    }

    #[test]
    fn missing_activity_reads_as_never() {
        let cards = map_statistics(&Statistics::default(), I18n::new(Language::En));
        assert_eq!(cards[6].value, "none yet");
    }

    #[test]
    fn roadmap_cards_count_modules() {
        let view = RoadmapView {
            modules: Vec::new(),
            completed_count: 0,
            study_time: 90,
            quiz_average: 0,
        };
        let cards = map_roadmap_stats(&view, I18n::new(Language::En));
        assert_eq!(cards[0].value, "0/0");
        assert_eq!(cards[1].value, "90 min");
    }
}
