//! Static theme registry.
//!
//! A theme is nothing more than a named CSS fragment layered on top of the
//! base structural stylesheet. The registry is a compile-time table — theme
//! CSS lives in `static/themes/` and is embedded with `include_str!`, so the
//! binary ships with zero runtime asset files.
//!
//! Every generated document gets `class="theme-{id}"` on `<body>`; each
//! theme's CSS scopes itself under that class, so an unknown theme id
//! degrades to the base styling rather than failing the render.

/// Structural CSS shared by every theme: reset, nav spacing, gallery grid.
pub const BASE_CSS: &str = include_str!("../static/base.css");

const MODERN_CSS: &str = include_str!("../static/themes/modern.css");
const MINIMAL_CSS: &str = include_str!("../static/themes/minimal.css");
const CLASSIC_CSS: &str = include_str!("../static/themes/classic.css");

/// Registry table, in display order.
const THEMES: &[(&str, &str)] = &[
    ("modern", MODERN_CSS),
    ("minimal", MINIMAL_CSS),
    ("classic", CLASSIC_CSS),
];

/// All registered theme ids, in display order.
pub fn theme_ids() -> Vec<&'static str> {
    THEMES.iter().map(|(id, _)| *id).collect()
}

/// Look up a theme's CSS fragment by id.
pub fn theme_css(id: &str) -> Option<&'static str> {
    THEMES
        .iter()
        .find(|(theme_id, _)| *theme_id == id)
        .map(|(_, css)| *css)
}

/// Full stylesheet for a document: base CSS plus the theme fragment.
///
/// Unknown ids contribute nothing, so the result is byte-identical to
/// [`BASE_CSS`] — a render-time fallback, not an error.
pub fn resolve_theme_styles(id: &str) -> String {
    format!("{}{}", BASE_CSS, theme_css(id).unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_three_themes() {
        assert_eq!(theme_ids(), vec!["modern", "minimal", "classic"]);
    }

    #[test]
    fn theme_css_scopes_under_body_class() {
        for id in theme_ids() {
            let css = theme_css(id).unwrap();
            assert!(css.contains(&format!("theme-{id}")), "theme {id} unscoped");
        }
    }

    #[test]
    fn resolve_includes_base_and_theme() {
        let styles = resolve_theme_styles("minimal");
        assert!(styles.starts_with(BASE_CSS));
        assert!(styles.contains("body.theme-minimal"));
    }

    #[test]
    fn unknown_theme_falls_back_to_base_only() {
        assert_eq!(resolve_theme_styles("nonexistent"), BASE_CSS);
    }

    #[test]
    fn unknown_theme_lookup_is_none() {
        assert!(theme_css("brutalist").is_none());
    }
}
