//! HTML generation: live preview, per-page exports, and the packaged site.
//!
//! Everything here is a pure function from the document model to text — no
//! I/O, no retained state. The preview and the exported pages share the same
//! building blocks: a base document shell, a hash-anchor navigation bar, a
//! gallery fragment, and the theme stylesheet from [`crate::theme`].
//!
//! ## Client-Side Markdown
//!
//! Generated documents do not contain rendered Markdown. Each content block
//! carries its Markdown source twice — as the element's text and in a
//! `data-markdown` attribute — and a bootstrap script loads
//! [marked](https://marked.js.org/) from a CDN and converts every block in
//! the browser. The static JS snippets are embedded at compile time from
//! `static/`.
//!
//! ## Known Limitation: No Escaping
//!
//! User-entered text (titles, content, image URLs) is interpolated into the
//! generated markup verbatim, via `PreEscaped`. An exported site shows
//! exactly what the user typed, including any markup. Hardening this would
//! change every exported byte for sites that rely on inline HTML, so the
//! behavior is kept and documented instead.

use std::collections::BTreeMap;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use thiserror::Error;

use crate::model::{ImageRef, Page, SiteConfig};
use crate::theme;

const NAV_JS: &str = include_str!("../static/nav.js");
const MARKDOWN_JS: &str = include_str!("../static/markdown.js");
const MARKED_CDN: &str = "https://cdn.jsdelivr.net/npm/marked/marked.min.js";

/// README dropped into every exported bundle.
const README_MD: &str = "Visit **your link here** to see this site in action!\n\n\
                         Made with [Simple Site](https://github.com/arthur-debert/simple-site)";

/// The complete exportable file set, filename → content. Archiving the map
/// into a single download is the packaging collaborator's job.
pub type SiteBundle = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// HTML Components
// ============================================================================

/// The document shell shared by the preview and page exports.
fn base_document(title: &str, theme_id: &str, content: Markup) -> Markup {
    let css = theme::resolve_theme_styles(theme_id);
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (PreEscaped(title)) }
                style { (PreEscaped(css)) }
                script src=(MARKED_CDN) {}
            }
            body class={ "theme-" (theme_id) } {
                (content)
            }
        }
    }
}

/// Nav link id that should carry the `active` class: the current fragment,
/// or the first page when no fragment is set.
fn active_nav_id(config: &SiteConfig, fragment: Option<&str>) -> Option<String> {
    match fragment {
        Some(f) if !f.is_empty() => Some(f.to_string()),
        _ => config.pages.first().map(|p| p.id.to_string()),
    }
}

/// One anchor link per page, `#<id>`, with the active link marked.
fn page_links(config: &SiteConfig, fragment: Option<&str>) -> Markup {
    let active = active_nav_id(config, fragment);
    html! {
        @for page in &config.pages {
            @let is_active = active.as_deref() == Some(page.id.to_string().as_str());
            a href={ "#" (page.id) } class=[is_active.then_some("active")] {
                (PreEscaped(&page.title))
            }
        }
    }
}

/// A content block: Markdown source as both text and `data-markdown`,
/// converted client-side by the bootstrap script.
fn content_block(markdown: &str) -> Markup {
    html! {
        div.content data-markdown=(PreEscaped(markdown)) { (PreEscaped(markdown)) }
    }
}

/// Gallery fragment: optional heading plus one figure per image.
///
/// Empty image list renders to the empty string. Entries with an empty URL
/// are skipped. A caption appears only for a non-empty title; the title also
/// serves as alt text, falling back to "Gallery image".
pub fn render_gallery(images: &[ImageRef], gallery_title: &str) -> Markup {
    if images.is_empty() {
        return html! {};
    }
    html! {
        @if !gallery_title.is_empty() {
            h3.gallery-title { (PreEscaped(gallery_title)) }
        }
        div.gallery {
            @for image in images {
                @let url = image.url();
                @let title = image.title();
                @if !url.is_empty() {
                    figure {
                        img src=(PreEscaped(url))
                            alt=(PreEscaped(if title.is_empty() { "Gallery image" } else { title }));
                        @if !title.is_empty() {
                            figcaption { (PreEscaped(title)) }
                        }
                    }
                }
            }
        }
    }
}

/// A page's preview section, hidden until navigated to.
fn page_section(page: &Page) -> Markup {
    html! {
        section id=(page.id) {
            h2 { (PreEscaped(&page.title)) }
            (content_block(&page.content))
            (render_gallery(&page.images, page.gallery_title.as_deref().unwrap_or("")))
        }
    }
}

// ============================================================================
// Documents
// ============================================================================

/// The full preview document: every section in one page, exactly one shown
/// at a time, switched by URL fragment.
///
/// `fragment` is the current URL fragment (without `#`); it only influences
/// which nav link is marked active — section visibility is handled by the
/// embedded script at display time, defaulting to the main section.
pub fn render_preview(config: &SiteConfig, fragment: Option<&str>) -> String {
    let main_heading = if config.main_title.is_empty() {
        "Main Page"
    } else {
        &config.main_title
    };
    let content = html! {
        nav.preview-navigation {
            a href="#main" { "Home" }
            (page_links(config, fragment))
        }
        main {
            section id="main" style="display: block;" {
                h2 { (PreEscaped(main_heading)) }
                (content_block(&config.main_content))
                (render_gallery(
                    &config.main_images,
                    config.main_gallery_title.as_deref().unwrap_or(""),
                ))
            }
            @for page in &config.pages {
                (page_section(page))
            }
        }
        script { (PreEscaped(NAV_JS)) }
        script { (PreEscaped(MARKDOWN_JS)) }
    };
    base_document(&config.main_title, &config.theme, content).into_string()
}

/// A standalone export of a single page: same navigation and theme, Markdown
/// bootstrap scoped to this document, gallery without a heading.
pub fn render_page(config: &SiteConfig, page: &Page) -> String {
    let title = format!("{} - {}", page.title, config.name);
    let content = html! {
        nav.preview-navigation {
            a href="index.html#main" { "Main" }
            (page_links(config, None))
        }
        main {
            h2 { (PreEscaped(&page.title)) }
            (content_block(&page.content))
            (render_gallery(&page.images, ""))
        }
        script { (PreEscaped(MARKDOWN_JS)) }
    };
    base_document(&title, &config.theme, content).into_string()
}

/// Assemble the complete exportable file set:
/// `index.html`, one `<id>.html` per page, `README.md`, `site-config.json`.
pub fn package_site(config: &SiteConfig) -> Result<SiteBundle, RenderError> {
    let mut files = SiteBundle::new();
    files.insert("index.html".to_string(), render_preview(config, None));
    for page in &config.pages {
        files.insert(format!("{}.html", page.id), render_page(config, page));
    }
    files.insert("README.md".to_string(), README_MD.to_string());
    files.insert(
        "site-config.json".to_string(),
        serde_json::to_string_pretty(config)?,
    );
    Ok(files)
}

/// Base filename for the downloadable archive: the site name, or "site".
pub fn archive_name(config: &SiteConfig) -> String {
    if config.name.is_empty() {
        "site".to_string()
    } else {
        config.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConfigUpdate, ImageRef, Page};

    fn sample_config() -> SiteConfig {
        SiteConfig {
            name: "my-site".to_string(),
            theme: "minimal".to_string(),
            main_title: "Welcome".to_string(),
            main_content: "# Hello".to_string(),
            main_images: vec![ImageRef::Full {
                url: "http://x/a.png".to_string(),
                title: "Dawn".to_string(),
            }],
            main_gallery_title: Some("Shots".to_string()),
            pages: vec![
                Page {
                    id: 100,
                    title: "About".to_string(),
                    content: "who **we** are".to_string(),
                    images: vec![],
                    gallery_title: None,
                },
                Page {
                    id: 200,
                    title: "Contact".to_string(),
                    content: String::new(),
                    images: vec![ImageRef::Legacy("http://x/c.png".to_string())],
                    gallery_title: Some(String::new()),
                },
            ],
        }
    }

    // =========================================================================
    // Gallery
    // =========================================================================

    #[test]
    fn empty_gallery_renders_to_empty_string() {
        assert_eq!(render_gallery(&[], "Anything").into_string(), "");
    }

    #[test]
    fn gallery_figure_without_caption_or_heading() {
        let images = [ImageRef::Full {
            url: "a".to_string(),
            title: String::new(),
        }];
        let html = render_gallery(&images, "").into_string();
        assert!(html.contains("<figure>"));
        assert!(html.contains(r#"<img src="a" alt="Gallery image">"#));
        assert!(!html.contains("figcaption"));
        assert!(!html.contains("gallery-title"));
    }

    #[test]
    fn gallery_caption_only_for_titled_images() {
        let images = [ImageRef::Full {
            url: "a".to_string(),
            title: "Dusk".to_string(),
        }];
        let html = render_gallery(&images, "").into_string();
        assert!(html.contains("<figcaption>Dusk</figcaption>"));
        assert!(html.contains(r#"alt="Dusk""#));
    }

    #[test]
    fn gallery_heading_for_nonempty_title() {
        let images = [ImageRef::Legacy("a".to_string())];
        let html = render_gallery(&images, "Trip").into_string();
        assert!(html.contains(r#"<h3 class="gallery-title">Trip</h3>"#));
    }

    #[test]
    fn gallery_skips_entries_with_empty_url() {
        let images = [ImageRef::empty(), ImageRef::Legacy("b".to_string())];
        let html = render_gallery(&images, "").into_string();
        assert_eq!(html.matches("<figure>").count(), 1);
        assert!(html.contains(r#"src="b""#));
    }

    #[test]
    fn gallery_legacy_entries_render_without_caption() {
        let images = [ImageRef::Legacy("http://x/a.png".to_string())];
        let html = render_gallery(&images, "").into_string();
        assert!(html.contains(r#"src="http://x/a.png""#));
        assert!(!html.contains("figcaption"));
    }

    // =========================================================================
    // Preview document
    // =========================================================================

    #[test]
    fn preview_is_a_full_document() {
        let html = render_preview(&sample_config(), None);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Welcome</title>"));
        assert!(html.contains(r#"class="theme-minimal""#));
        assert!(html.contains(MARKED_CDN));
    }

    #[test]
    fn preview_nav_lists_home_and_every_page() {
        let html = render_preview(&sample_config(), None);
        assert!(html.contains(r##"<a href="#main">Home</a>"##));
        assert!(html.contains(r##"href="#100""##));
        assert!(html.contains(r##"href="#200""##));
        assert!(html.contains("About"));
        assert!(html.contains("Contact"));
    }

    #[test]
    fn preview_has_one_section_per_page_plus_main() {
        let html = render_preview(&sample_config(), None);
        assert!(html.contains(r#"<section id="main" style="display: block;">"#));
        assert!(html.contains(r#"<section id="100">"#));
        assert!(html.contains(r#"<section id="200">"#));
    }

    #[test]
    fn preview_embeds_markdown_source_twice() {
        let html = render_preview(&sample_config(), None);
        assert!(html.contains(r##"data-markdown="# Hello""##));
        assert!(html.contains(r#"data-markdown="who **we** are""#));
        // and the unrendered copy as element text
        assert!(html.contains(">who **we** are</div>"));
    }

    #[test]
    fn preview_includes_bootstrap_scripts() {
        let html = render_preview(&sample_config(), None);
        assert!(html.contains("function showSection"));
        assert!(html.contains("marked.parse"));
    }

    #[test]
    fn preview_main_heading_falls_back_when_title_empty() {
        let html = render_preview(&SiteConfig::new(), None);
        assert!(html.contains("<h2>Main Page</h2>"));
    }

    #[test]
    fn preview_marks_fragment_link_active() {
        let html = render_preview(&sample_config(), Some("200"));
        assert!(html.contains(r##"<a href="#200" class="active">"##));
        assert!(!html.contains(r##"<a href="#100" class="active">"##));
    }

    #[test]
    fn preview_defaults_active_to_first_page() {
        let html = render_preview(&sample_config(), None);
        assert!(html.contains(r##"<a href="#100" class="active">"##));
    }

    #[test]
    fn preview_interpolates_user_text_verbatim() {
        let config = SiteConfig::new().update(ConfigUpdate {
            main_title: Some("<b>Bold</b>".to_string()),
            ..Default::default()
        });
        let html = render_preview(&config, None);
        // Known limitation: no escaping, exactly what the user typed
        assert!(html.contains("<h2><b>Bold</b></h2>"));
    }

    #[test]
    fn preview_renders_main_gallery_with_title() {
        let html = render_preview(&sample_config(), None);
        assert!(html.contains(r#"<h3 class="gallery-title">Shots</h3>"#));
        assert!(html.contains(r#"<figcaption>Dawn</figcaption>"#));
    }

    // =========================================================================
    // Page export
    // =========================================================================

    #[test]
    fn page_export_title_joins_page_and_site_name() {
        let config = sample_config();
        let html = render_page(&config, &config.pages[0]);
        assert!(html.contains("<title>About - my-site</title>"));
    }

    #[test]
    fn page_export_links_back_to_index() {
        let config = sample_config();
        let html = render_page(&config, &config.pages[0]);
        assert!(html.contains(r##"<a href="index.html#main">Main</a>"##));
    }

    #[test]
    fn page_export_gallery_has_no_heading() {
        let config = sample_config();
        // Page 200 has images; its export must not carry a gallery heading
        let html = render_page(&config, &config.pages[1]);
        assert!(html.contains("<figure>"));
        assert!(!html.contains("gallery-title"));
    }

    #[test]
    fn page_export_has_markdown_bootstrap_but_no_section_switcher() {
        let config = sample_config();
        let html = render_page(&config, &config.pages[0]);
        assert!(html.contains("marked.parse"));
        assert!(!html.contains("function showSection"));
    }

    // =========================================================================
    // Packaging
    // =========================================================================

    #[test]
    fn package_contains_expected_filenames() {
        let files = package_site(&sample_config()).unwrap();
        let names: Vec<&str> = files.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec![
                "100.html",
                "200.html",
                "README.md",
                "index.html",
                "site-config.json",
            ]
        );
    }

    #[test]
    fn packaged_config_json_round_trips() {
        let config = sample_config();
        let files = package_site(&config).unwrap();
        let back: SiteConfig = serde_json::from_str(&files["site-config.json"]).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn packaged_readme_references_the_tool() {
        let files = package_site(&sample_config()).unwrap();
        assert!(files["README.md"].contains("Simple Site"));
    }

    #[test]
    fn archive_name_falls_back_to_site() {
        assert_eq!(archive_name(&SiteConfig::new()), "site");
        assert_eq!(archive_name(&sample_config()), "my-site");
    }

    #[test]
    fn theme_fallback_keeps_render_total() {
        let config = SiteConfig {
            theme: "nonexistent".to_string(),
            ..SiteConfig::new()
        };
        let html = render_preview(&config, None);
        assert!(html.contains(r#"class="theme-nonexistent""#));
        // Base structural CSS still present
        assert!(html.contains(".gallery"));
    }
}
