//! Mutation operations on the document model.
//!
//! Every operation here is a pure function from `(SiteConfig, arguments)` to
//! a new `SiteConfig`. Nothing mutates in place and nothing fails: a missing
//! page id or an out-of-range image index makes the operation a no-op that
//! returns the input unchanged. That keeps the caller's dispatch loop free of
//! error plumbing — the visible state simply doesn't change.
//!
//! The one piece of non-pure input is page id generation, which draws from a
//! [`PageIdSource`]. Ids are wall-clock milliseconds forced strictly
//! monotonic, so two pages created within the same clock tick still get
//! distinct ids. The source is owned by whoever owns the document (see
//! [`crate::session::Session`]) — there is no process-wide global.
//!
//! Image mutations normalize legacy bare-string entries to the structured
//! `{url, title}` form on every touch. Lists imported from old exports are
//! never migrated eagerly; an entry converts the first time it is edited.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{ImageRef, Page, PageId, SiteConfig};

/// Title given to freshly created pages.
pub const NEW_PAGE_TITLE: &str = "New Page";

/// Which gallery an image operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryTarget {
    /// The main page's gallery.
    Main,
    /// The gallery of the page with this id.
    Page(PageId),
}

/// Strictly monotonic page id generator seeded from the wall clock.
///
/// Each call returns `max(now_millis, previous + 1)`, so ids sort by creation
/// time but can never repeat — even for creations within one millisecond.
#[derive(Debug, Default)]
pub struct PageIdSource {
    last: AtomicI64,
}

impl PageIdSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source that will never produce an id at or below `floor`.
    ///
    /// Used when resuming a document whose pages already carry ids.
    pub fn above(floor: PageId) -> Self {
        Self {
            last: AtomicI64::new(floor),
        }
    }

    pub fn next(&self) -> PageId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(prev + 1)
    }
}

/// Append a new empty page titled "New Page" with a fresh id.
pub fn add_page(config: &SiteConfig, ids: &PageIdSource) -> SiteConfig {
    let mut next = config.clone();
    next.pages.push(Page {
        id: ids.next(),
        title: NEW_PAGE_TITLE.to_string(),
        ..Page::default()
    });
    next
}

/// Remove the page with the given id. Unknown id: no-op.
pub fn delete_page(config: &SiteConfig, id: PageId) -> SiteConfig {
    let mut next = config.clone();
    next.pages.retain(|p| p.id != id);
    next
}

/// Replace a page's title. Unknown id: no-op.
pub fn update_page_title(config: &SiteConfig, id: PageId, title: &str) -> SiteConfig {
    map_page(config, id, |page| page.title = title.to_string())
}

/// Replace a page's Markdown content. Unknown id: no-op.
pub fn update_page_content(config: &SiteConfig, id: PageId, content: &str) -> SiteConfig {
    map_page(config, id, |page| page.content = content.to_string())
}

/// Rebuild the page list in the order given by `order`.
///
/// Each id resolves to its existing page, content intact. Ids not present in
/// the document are silently dropped; document pages missing from `order` are
/// lost — the caller supplies a complete permutation.
pub fn reorder_pages(config: &SiteConfig, order: &[PageId]) -> SiteConfig {
    let mut next = config.clone();
    next.pages = order
        .iter()
        .filter_map(|id| config.page(*id).cloned())
        .collect();
    next
}

/// Append an empty `{url: "", title: ""}` entry to the target gallery.
///
/// Adding the first image to a page also brings its gallery title into
/// existence as the empty string — a one-way transition; the main gallery
/// title is only ever created by [`update_gallery_title`].
pub fn add_image(config: &SiteConfig, target: GalleryTarget) -> SiteConfig {
    match target {
        GalleryTarget::Main => {
            let mut next = config.clone();
            next.main_images.push(ImageRef::empty());
            next
        }
        GalleryTarget::Page(id) => map_page(config, id, |page| {
            page.images.push(ImageRef::empty());
            page.gallery_title.get_or_insert_default();
        }),
    }
}

/// Replace the URL of the entry at `index`, normalizing it to the structured
/// form. Out-of-range index or unknown page: no-op.
pub fn update_image_url(
    config: &SiteConfig,
    target: GalleryTarget,
    index: usize,
    url: &str,
) -> SiteConfig {
    map_images(config, target, |images| {
        if let Some(entry) = images.get_mut(index) {
            *entry = entry.with_url(url);
        }
    })
}

/// Replace the title of the entry at `index`, normalizing it to the
/// structured form. Out-of-range index or unknown page: no-op.
pub fn update_image_title(
    config: &SiteConfig,
    target: GalleryTarget,
    index: usize,
    title: &str,
) -> SiteConfig {
    map_images(config, target, |images| {
        if let Some(entry) = images.get_mut(index) {
            *entry = entry.with_title(title);
        }
    })
}

/// Splice out the entry at `index`; later entries shift down.
/// Out-of-range index or unknown page: no-op.
pub fn remove_image(config: &SiteConfig, target: GalleryTarget, index: usize) -> SiteConfig {
    map_images(config, target, |images| {
        if index < images.len() {
            images.remove(index);
        }
    })
}

/// Set the target gallery's title. Unknown page: no-op.
pub fn update_gallery_title(config: &SiteConfig, target: GalleryTarget, title: &str) -> SiteConfig {
    match target {
        GalleryTarget::Main => {
            let mut next = config.clone();
            next.main_gallery_title = Some(title.to_string());
            next
        }
        GalleryTarget::Page(id) => {
            map_page(config, id, |page| page.gallery_title = Some(title.to_string()))
        }
    }
}

/// Copy `config` and apply `f` to the page with the given id, if present.
fn map_page(config: &SiteConfig, id: PageId, f: impl FnOnce(&mut Page)) -> SiteConfig {
    let mut next = config.clone();
    if let Some(page) = next.pages.iter_mut().find(|p| p.id == id) {
        f(page);
    }
    next
}

/// Copy `config` and apply `f` to the target gallery's image list, if present.
fn map_images(
    config: &SiteConfig,
    target: GalleryTarget,
    f: impl FnOnce(&mut Vec<ImageRef>),
) -> SiteConfig {
    let mut next = config.clone();
    match target {
        GalleryTarget::Main => f(&mut next.main_images),
        GalleryTarget::Page(id) => {
            if let Some(page) = next.pages.iter_mut().find(|p| p.id == id) {
                f(&mut page.images);
            }
        }
    }
    next
}
