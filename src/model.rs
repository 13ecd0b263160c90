//! The site document model.
//!
//! A [`SiteConfig`] is the complete description of a site being built: name,
//! theme, the main page's title/content/gallery, and an ordered list of
//! [`Page`]s. It is a plain value — every editing operation produces a new
//! `SiteConfig` rather than mutating in place, which keeps undo snapshots
//! and the persisted copy trivially consistent.
//!
//! ## Serialized Shape
//!
//! The JSON form doubles as the persistence format, the import/export format,
//! and the `site-config.json` file shipped inside exported sites:
//!
//! ```json
//! {
//!   "name": "my-site",
//!   "theme": "modern",
//!   "mainTitle": "Welcome",
//!   "mainContent": "# Hello",
//!   "mainImages": ["http://x/a.png", {"url": "http://x/b.png", "title": "B"}],
//!   "mainGalleryTitle": "Shots",
//!   "pages": [
//!     {"id": 1712000000000, "title": "About", "content": "", "images": []}
//!   ]
//! }
//! ```
//!
//! Deserialization is lenient: missing fields take their defaults, so JSON
//! exported by older builds (no `galleryTitle`, bare-string images) loads
//! without a migration step.
//!
//! ## Legacy Image Entries
//!
//! Gallery entries were historically bare URL strings; newer exports use
//! `{url, title}` objects. [`ImageRef`] models both forms explicitly.
//! Mutations normalize an entry to the structured form the first time they
//! touch it ([`ImageRef::normalized`]); untouched entries round-trip in
//! whichever form they arrived.

use serde::{Deserialize, Serialize};

/// Page identifier. Millisecond-scale, strictly monotonic within a session
/// (see [`crate::mutate::PageIdSource`]); stable across reorders.
pub type PageId = i64;

/// Theme identifier used when none is chosen (see [`crate::theme`]).
pub const DEFAULT_THEME: &str = "modern";

/// The root document: everything the builder knows about one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    /// Site name, used as the export archive's base filename.
    pub name: String,
    /// Theme registry key. Unknown values fall back to base styling at render.
    pub theme: String,
    /// Main (home) page heading.
    pub main_title: String,
    /// Main page body as Markdown source text.
    pub main_content: String,
    /// Main page gallery entries, in display order.
    pub main_images: Vec<ImageRef>,
    /// Main gallery heading. Absent until the user sets one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_gallery_title: Option<String>,
    /// Ordered, user-arranged list of pages.
    pub pages: Vec<Page>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            theme: DEFAULT_THEME.to_string(),
            main_title: String::new(),
            main_content: String::new(),
            main_images: Vec::new(),
            main_gallery_title: None,
            pages: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// The default empty document: empty strings, default theme, no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow-merge `update` into a copy of this config.
    ///
    /// Fields left as `None` are unchanged. List fields replace wholesale —
    /// there is no deep merge; callers changing `pages` or `main_images`
    /// supply the full replacement list.
    pub fn update(&self, update: ConfigUpdate) -> Self {
        Self {
            name: update.name.unwrap_or_else(|| self.name.clone()),
            theme: update.theme.unwrap_or_else(|| self.theme.clone()),
            main_title: update.main_title.unwrap_or_else(|| self.main_title.clone()),
            main_content: update
                .main_content
                .unwrap_or_else(|| self.main_content.clone()),
            main_images: update
                .main_images
                .unwrap_or_else(|| self.main_images.clone()),
            main_gallery_title: update
                .main_gallery_title
                .or_else(|| self.main_gallery_title.clone()),
            pages: update.pages.unwrap_or_else(|| self.pages.clone()),
        }
    }

    /// Check the fields a publishable site needs: `name`, `theme`, `mainTitle`.
    ///
    /// Emptiness is the only failure mode — the document itself is always
    /// structurally total.
    pub fn validate(&self) -> Validation {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name");
        }
        if self.theme.is_empty() {
            missing.push("theme");
        }
        if self.main_title.is_empty() {
            missing.push("mainTitle");
        }
        Validation {
            is_valid: missing.is_empty(),
            missing_fields: missing,
        }
    }

    /// Look up a page by id.
    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }
}

/// Partial top-level field set for [`SiteConfig::update`].
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub name: Option<String>,
    pub theme: Option<String>,
    pub main_title: Option<String>,
    pub main_content: Option<String>,
    pub main_images: Option<Vec<ImageRef>>,
    pub main_gallery_title: Option<String>,
    pub pages: Option<Vec<Page>>,
}

/// Result of [`SiteConfig::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub is_valid: bool,
    /// JSON field names of the required fields that are empty.
    pub missing_fields: Vec<&'static str>,
}

/// A single site page: its own content and image gallery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Page {
    /// Creation-time id; unique within the document, stable across reorders.
    pub id: PageId,
    /// Page heading, also the navigation link label.
    pub title: String,
    /// Page body as Markdown source text.
    pub content: String,
    /// Gallery entries, in display order.
    pub images: Vec<ImageRef>,
    /// Gallery heading. Absent until the first image is added, at which point
    /// it becomes the empty string — a one-way transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery_title: Option<String>,
}

/// One gallery entry: a URL plus an optional caption.
///
/// `Legacy` is the historical bare-string form (URL only, implicit empty
/// title), still accepted on import. `Full` is the structured form every
/// mutation writes. Both serialize back out as they are, so an imported
/// document re-exports byte-compatibly until the user edits an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    /// Structured entry: `{"url": ..., "title": ...}`.
    Full {
        #[serde(default)]
        url: String,
        #[serde(default)]
        title: String,
    },
    /// Bare URL string from older exports.
    Legacy(String),
}

impl ImageRef {
    /// An empty structured entry, as appended by "add image".
    pub fn empty() -> Self {
        ImageRef::Full {
            url: String::new(),
            title: String::new(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ImageRef::Full { url, .. } => url,
            ImageRef::Legacy(url) => url,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ImageRef::Full { title, .. } => title,
            ImageRef::Legacy(_) => "",
        }
    }

    /// Convert to the structured form, keeping URL and title.
    pub fn normalized(&self) -> Self {
        ImageRef::Full {
            url: self.url().to_string(),
            title: self.title().to_string(),
        }
    }

    /// Normalized copy with the URL replaced.
    pub fn with_url(&self, url: &str) -> Self {
        ImageRef::Full {
            url: url.to_string(),
            title: self.title().to_string(),
        }
    }

    /// Normalized copy with the title replaced.
    pub fn with_title(&self, title: &str) -> Self {
        ImageRef::Full {
            url: self.url().to_string(),
            title: title.to_string(),
        }
    }
}
