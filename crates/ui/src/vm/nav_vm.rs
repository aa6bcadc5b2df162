use prep_core::route::RouteKind;
use services::{Catalog, I18n};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLinkVm {
    pub route: String,
    pub label: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavSectionVm {
    pub label: String,
    pub links: Vec<NavLinkVm>,
}

/// Sidebar sections in catalog order. The search page is reached through the
/// search box, so it gets no link.
#[must_use]
pub fn map_nav_sections(catalog: &Catalog, active_route: &str, i18n: I18n) -> Vec<NavSectionVm> {
    catalog
        .sections()
        .into_iter()
        .filter_map(|(section, entries)| {
            let links: Vec<NavLinkVm> = entries
                .into_iter()
                .filter(|entry| entry.kind() != RouteKind::Search)
                .map(|entry| NavLinkVm {
                    label: tool_label(&entry.kind(), i18n)
                        .unwrap_or_else(|| entry.nav_label().to_string()),
                    active: entry.route == active_route,
                    route: entry.route.clone(),
                })
                .collect();
            (!links.is_empty()).then(|| NavSectionVm {
                label: i18n.t(section.label_key()).to_string(),
                links,
            })
        })
        .collect()
}

fn tool_label(kind: &RouteKind, i18n: I18n) -> Option<String> {
    let key = match kind {
        RouteKind::Roadmap => "nav.roadmap",
        RouteKind::Favorites => "nav.favorites",
        RouteKind::Progress => "nav.progress",
        _ => return None,
    };
    Some(i18n.t(key).to_string())
}
