mod favorites;
mod header;
mod page;
mod progress;
mod quiz;
mod roadmap;
mod search;
mod state;
mod status;
mod theory;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

use dioxus::prelude::*;
use services::View;

pub use favorites::FavoritesContent;
pub use header::PageHeaderView;
pub use page::{BookmarkButton, PageContent};
pub use progress::{ProgressContent, StatCards};
pub use quiz::QuizContent;
pub use roadmap::RoadmapContent;
pub use search::SearchContent;
pub use state::{LoadingView, ViewError, ViewState};
pub use status::{ContentUnavailableView, ErrorView, NotFoundView};
pub use theory::TheoryContent;

/// Main pane for one router view.
#[component]
pub fn ContentView(view: View) -> Element {
    match view {
        View::Page(view) => rsx! { PageContent { view } },
        View::Theory(view) => rsx! { TheoryContent { view } },
        View::Quiz(session) => rsx! { QuizContent { session } },
        View::Roadmap(view) => rsx! { RoadmapContent { view } },
        View::Search(view) => rsx! { SearchContent { view } },
        View::Favorites(view) => rsx! { FavoritesContent { view } },
        View::Progress(view) => rsx! { ProgressContent { view } },
        View::NotFound { route } => rsx! { NotFoundView { route } },
        View::ContentUnavailable {
            title,
            path,
            detail,
        } => rsx! { ContentUnavailableView { title, path, detail } },
        View::Error { message } => rsx! { ErrorView { message } },
    }
}
