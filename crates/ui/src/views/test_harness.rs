use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use prep_core::time::fixed_clock;
use services::{AppServices, ContentSource, StaticSource, View};

use crate::app::App;
use crate::context::{UiApp, build_app_context};
use crate::location::HashLocation;
use crate::views::ContentView;

pub const JAVA: &str = "---
title: Java Alapok
difficulty: beginner
estimatedMinutes: 45
goals: [OOP, Streams]
starter:
  stackblitz: https://stackblitz.com/edit/java
---
# Java Alapok

Bevezető szöveg.

## Fogalmak

### Generics
Típusbiztos gyűjtemények.

### Streams
Funkcionális feldolgozás.
";

pub const QUIZ: &str = r#"{
    "title": "Java Teszt",
    "description": "Alapok",
    "questions": [
        { "type": "multiple", "question": "Melyik kulcsszó örököl?", "options": ["extends", "implements"], "correct": 0 },
        { "type": "true-false", "question": "A String mutable?", "correct": false, "explanation": "Immutable." }
    ]
}"#;

pub const ROADMAP: &str = r##"{"modules":[
    {"title":"Java modul","description":"OOP","estimatedHours":10,"route":"#/theory/java","quizRoute":"#/quiz/java"}
]}"##;

fn source() -> Arc<dyn ContentSource> {
    Arc::new(
        StaticSource::new()
            .with_file("theory/java.md", JAVA)
            .with_file("checklists/interview.md", "# Interjú\n\n- Mesélj magadról\n")
            .with_file("data/quizzes/java.json", QUIZ)
            .with_file("data/roadmap.json", ROADMAP),
    )
}

pub async fn services() -> Arc<AppServices> {
    Arc::new(
        AppServices::in_memory(source(), fixed_clock(), Some("hu_HU.UTF-8"))
            .await
            .expect("services"),
    )
}

#[derive(Clone, PartialEq)]
pub enum Screen {
    /// The whole shell, starting at the given hash.
    App(String),
    View(View),
}

struct StartAt {
    services: Arc<AppServices>,
    route: String,
}

impl UiApp for StartAt {
    fn router(&self) -> services::Router {
        self.services.router()
    }

    fn storage(&self) -> storage::StorageManager {
        self.services.storage()
    }

    fn quiz(&self) -> services::QuizRunner {
        self.services.quiz()
    }

    fn i18n(&self) -> services::I18n {
        self.services.i18n()
    }

    fn start_route(&self) -> Option<String> {
        Some(self.route.clone())
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    services: Arc<AppServices>,
    screen: Screen,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn Harness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = match &props.screen {
        Screen::App(route) => Arc::new(StartAt {
            services: Arc::clone(&props.services),
            route: route.clone(),
        }),
        Screen::View(_) => props.services.clone(),
    };
    use_context_provider(|| build_app_context(&app));
    match props.screen {
        Screen::App(_) => rsx! { App {} },
        Screen::View(view) => rsx! { ViewHost { view } },
    }
}

#[component]
fn ViewHost(view: View) -> Element {
    use_context_provider(|| HashLocation::new("#/"));
    rsx! { ContentView { view } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn new(services: Arc<AppServices>, screen: Screen) -> Self {
        let dom = VirtualDom::new_with_props(Harness, HarnessProps { services, screen });
        Self { dom }
    }

    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..4 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Navigate with the real router and mount the resulting view.
pub async fn render_route(route: &str) -> (Arc<AppServices>, String) {
    let services = services().await;
    let navigation = services.router().navigate(route, 1280).await;
    let mut harness = ViewHarness::new(Arc::clone(&services), Screen::View(navigation.view));
    harness.rebuild();
    let html = harness.render();
    (services, html)
}
