mod nav_vm;
mod quiz_vm;
mod stats_vm;
mod time_fmt;

pub use nav_vm::{NavLinkVm, NavSectionVm, map_nav_sections};
pub use quiz_vm::{
    OptionVm, QuestionVm, QuizIntroVm, QuizResultVm, ReviewLineVm, map_outcome, map_question,
    map_quiz_intro,
};
pub use stats_vm::{StatCardVm, map_roadmap_stats, map_statistics};
pub use time_fmt::{format_date, format_datetime};
