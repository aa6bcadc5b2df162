use pulldown_cmark::{Event, Options, Parser, TagEnd};

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options
}

/// Convert markdown to sanitized HTML.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let parser = Parser::new_ext(input, parser_options());
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

/// Strip scripts, event handlers and unsafe URLs from rendered content.
///
/// Code blocks keep their `language-*` class and headings keep their `id`
/// so deep links resolve.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    ammonia::Builder::default()
        .add_tags(["input"])
        .add_tag_attributes("code", &["class"])
        .add_tag_attributes("input", &["type", "checked", "disabled"])
        .add_generic_attributes(&["id"])
        .clean(html)
        .to_string()
}

/// Plain text of a markdown fragment, for search and summaries.
#[must_use]
pub fn markdown_to_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for event in Parser::new_ext(input, parser_options()) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock) => {
                out.push('\n');
            }
            _ => {}
        }
    }
    out.trim().to_string()
}
