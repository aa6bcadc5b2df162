//! Webview glue, evaluated through `document::eval`.

/// Posts `{hash, width}` on load and on every `hashchange`, `{width}` on resize.
pub const HASH_BRIDGE: &str = r#"
    const post = () => dioxus.send({ hash: window.location.hash, width: window.innerWidth });
    window.addEventListener("hashchange", post);
    window.addEventListener("resize", () => dioxus.send({ width: window.innerWidth }));
    post();
"#;

/// Mirror an in-app navigation into the webview history without re-firing `hashchange`.
#[must_use]
pub fn push_hash_script(hash: &str) -> String {
    format!(
        r#"if (window.location.hash !== {hash:?}) {{ history.pushState(null, "", {hash:?}); }}"#
    )
}

/// Scroll a concept into view, or to the top when there is no anchor.
#[must_use]
pub fn scroll_script(anchor: Option<&str>) -> String {
    match anchor {
        Some(anchor) => format!(
            r#"(function() {{
                const el = document.getElementById({anchor:?});
                if (el) {{ el.scrollIntoView({{ behavior: "smooth", block: "start" }}); }}
            }})();"#
        ),
        None => "window.scrollTo(0, 0);".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_are_quoted() {
        let js = scroll_script(Some("a\"b"));
        assert!(js.contains(r#""a\"b""#));
        assert_eq!(scroll_script(None), "window.scrollTo(0, 0);");
    }
}
