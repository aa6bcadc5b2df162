use prep_core::model::QuizResult;
use prep_core::time::fixed_now;

use super::test_harness::{Screen, ViewHarness, render_route, services};

#[tokio::test(flavor = "current_thread")]
async fn theory_view_renders_concepts_and_header() {
    let (services, html) = render_route("#/theory/java").await;
    let i18n = services.i18n();

    assert!(html.contains("Java Alapok"), "missing title in {html}");
    assert!(html.contains(r#"id="generics""#), "missing concept anchor in {html}");
    assert!(html.contains(r#"id="streams""#), "missing concept anchor in {html}");
    assert!(html.contains("#/theory/java#streams"), "missing deep link in {html}");
    assert!(html.contains("StackBlitz"), "missing starter link in {html}");
    assert!(html.contains(i18n.t("theory.markRead")), "missing read toggle in {html}");
    let progress = i18n.format("theory.progress", &[("read", "0"), ("total", "2")]);
    assert!(html.contains(&progress), "missing {progress} in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn theory_view_reflects_stored_read_flags() {
    let services = services().await;
    services
        .storage()
        .set_concept_read("#/theory/java", "streams", true)
        .await
        .expect("mark read");
    let navigation = services.router().navigate("#/theory/java", 1280).await;

    let mut harness = ViewHarness::new(services.clone(), Screen::View(navigation.view));
    harness.rebuild();
    let html = harness.render();
    let progress = services
        .i18n()
        .format("theory.progress", &[("read", "1"), ("total", "2")]);
    assert!(html.contains(&progress), "missing {progress} in {html}");
    assert!(html.contains("concept read"), "missing read class in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_renders_first_question() {
    let (services, html) = render_route("#/quiz/java").await;
    let i18n = services.i18n();

    assert!(html.contains("Java Teszt"), "missing quiz title in {html}");
    assert!(html.contains("Melyik kulcsszó örököl?"), "missing prompt in {html}");
    assert!(html.contains("extends"), "missing option in {html}");
    assert!(html.contains(i18n.t("quiz.next")), "missing next button in {html}");
    assert!(!html.contains(i18n.t("quiz.finish")), "finish shown too early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn missing_content_offers_a_reload() {
    let (services, html) = render_route("#/theory/sql").await;
    assert!(html.contains("theory/sql.md"), "missing path in {html}");
    assert!(html.contains(services.i18n().t("content.reload")), "missing reload in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn unknown_route_renders_not_found() {
    let (services, html) = render_route("#/nope").await;
    assert!(
        html.contains(services.i18n().t("error.notfound.title")),
        "missing not-found title in {html}"
    );
    assert!(html.contains("#/nope"), "missing route in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn roadmap_view_links_modules() {
    let (_services, html) = render_route("#/roadmap").await;
    assert!(html.contains("Java modul"), "missing module in {html}");
    assert!(html.contains(r##"href="#/quiz/java""##), "missing quiz link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn favorites_view_lists_bookmarks_and_concepts() {
    let services = services().await;
    let storage = services.storage();
    storage
        .toggle_bookmark("#/checklists/interview", "Interjú", "")
        .await
        .expect("bookmark");
    storage
        .toggle_concept_favorite("java", "generics", "Generics")
        .await
        .expect("favorite");
    let navigation = services.router().navigate("#/favorites", 1280).await;

    let mut harness = ViewHarness::new(services.clone(), Screen::View(navigation.view));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Interjú"), "missing bookmark in {html}");
    assert!(html.contains("#/theory/java#generics"), "missing concept link in {html}");
    assert!(!html.contains(services.i18n().t("favorites.empty")), "unexpected empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_lists_recent_quizzes() {
    let services = services().await;
    services
        .storage()
        .save_quiz_result(QuizResult::new("Java Teszt", 3, 4, 5, fixed_now()))
        .await
        .expect("save result");
    let navigation = services.router().navigate("#/progress", 1280).await;

    let mut harness = ViewHarness::new(services.clone(), Screen::View(navigation.view));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Java Teszt"), "missing quiz row in {html}");
    assert!(html.contains("75%"), "missing score in {html}");
    assert!(html.contains("3/4"), "missing detail in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn search_view_links_concept_hits() {
    let (_services, html) = render_route("#/search?q=stream").await;
    assert!(html.contains("#/theory/java#streams"), "missing hit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn app_shell_loads_the_start_route() {
    let services = services().await;
    let mut harness = ViewHarness::new(
        services.clone(),
        Screen::App("#/checklists/interview".to_string()),
    );
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Mesélj magadról"), "missing page body in {html}");
    assert!(html.contains("nav-link active"), "missing active link in {html}");
    assert_eq!(
        services.router().current_route().await.as_deref(),
        Some("#/checklists/interview")
    );
}
