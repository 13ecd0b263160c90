//! The editing session: one document, its history, and its storage.
//!
//! `Session` is the explicit state container the rest of the system hangs
//! off — there is no ambient global document. The UI (or CLI) dispatches
//! [`Command`]s; every dispatch runs the same pipeline:
//!
//! ```text
//! snapshot (undo pre-image) → mutate → persist → caller re-renders
//! ```
//!
//! Snapshot capture is part of the dispatch wrapper, not an opt-in call at
//! each site, so every user action has a pre-image on the undo stack.
//! Bursty text edits should be coalesced *before* dispatch (see
//! [`crate::debounce`]) so a burst costs one command and one snapshot.
//!
//! Import replaces the document wholesale: the incoming JSON is parsed
//! first, and only on success does any state change. A malformed file
//! surfaces one error and leaves the current document untouched.

use thiserror::Error;

use crate::history::{History, HistoryError};
use crate::model::{ConfigUpdate, PageId, SiteConfig};
use crate::mutate::{self, GalleryTarget, PageIdSource};
use crate::render;
use crate::store::{CONFIG_KEY, ConfigStore, StoreError};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
    #[error("history error: {0}")]
    History(#[from] HistoryError),
    #[error("saved document is not valid JSON: {0}")]
    Corrupt(serde_json::Error),
    #[error("imported file is not a valid site configuration: {0}")]
    Import(serde_json::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An editing operation, as dispatched by the form layer.
#[derive(Debug, Clone)]
pub enum Command {
    /// Shallow-merge top-level fields (the debounced form inputs).
    UpdateFields(ConfigUpdate),
    AddPage,
    DeletePage(PageId),
    UpdatePageTitle { id: PageId, title: String },
    UpdatePageContent { id: PageId, content: String },
    /// Complete permutation of page ids, as produced by drag reordering.
    ReorderPages(Vec<PageId>),
    AddImage(GalleryTarget),
    UpdateImageUrl {
        target: GalleryTarget,
        index: usize,
        url: String,
    },
    UpdateImageTitle {
        target: GalleryTarget,
        index: usize,
        title: String,
    },
    RemoveImage { target: GalleryTarget, index: usize },
    UpdateGalleryTitle {
        target: GalleryTarget,
        title: String,
    },
}

/// One user's editing session over one document.
pub struct Session<S: ConfigStore> {
    config: SiteConfig,
    history: History,
    ids: PageIdSource,
    store: S,
}

impl<S: ConfigStore> Session<S> {
    /// Open a session, resuming the persisted document if the store has one.
    ///
    /// The id source is seeded above the highest existing page id so resumed
    /// documents keep the no-collision guarantee.
    pub fn open(store: S) -> Result<Self, SessionError> {
        let config = match store.get(CONFIG_KEY)? {
            Some(text) => serde_json::from_str(&text).map_err(SessionError::Corrupt)?,
            None => SiteConfig::new(),
        };
        let ids = PageIdSource::above(max_page_id(&config));
        Ok(Self {
            config,
            history: History::new(),
            ids,
            store,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Dispatch one command: snapshot, mutate, persist.
    pub fn apply(&mut self, command: Command) -> Result<&SiteConfig, SessionError> {
        self.history.snapshot(&self.config)?;
        self.config = self.run(command);
        self.persist()?;
        Ok(&self.config)
    }

    fn run(&self, command: Command) -> SiteConfig {
        let config = &self.config;
        match command {
            Command::UpdateFields(update) => config.update(update),
            Command::AddPage => mutate::add_page(config, &self.ids),
            Command::DeletePage(id) => mutate::delete_page(config, id),
            Command::UpdatePageTitle { id, title } => {
                mutate::update_page_title(config, id, &title)
            }
            Command::UpdatePageContent { id, content } => {
                mutate::update_page_content(config, id, &content)
            }
            Command::ReorderPages(order) => mutate::reorder_pages(config, &order),
            Command::AddImage(target) => mutate::add_image(config, target),
            Command::UpdateImageUrl { target, index, url } => {
                mutate::update_image_url(config, target, index, &url)
            }
            Command::UpdateImageTitle {
                target,
                index,
                title,
            } => mutate::update_image_title(config, target, index, &title),
            Command::RemoveImage { target, index } => {
                mutate::remove_image(config, target, index)
            }
            Command::UpdateGalleryTitle { target, title } => {
                mutate::update_gallery_title(config, target, &title)
            }
        }
    }

    /// Step back one state. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, SessionError> {
        match self.history.undo(&self.config)? {
            Some(previous) => {
                self.config = previous;
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Step forward again. Returns `false` when the redo lane is empty.
    pub fn redo(&mut self) -> Result<bool, SessionError> {
        match self.history.redo(&self.config)? {
            Some(next) => {
                self.config = next;
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace the document with an imported JSON file.
    ///
    /// Parses before touching anything: a malformed file returns
    /// [`SessionError::Import`] and the session is exactly as it was. A
    /// successful import is undoable like any other action.
    pub fn import_json(&mut self, text: &str) -> Result<&SiteConfig, SessionError> {
        let imported: SiteConfig =
            serde_json::from_str(text).map_err(SessionError::Import)?;
        self.history.snapshot(&self.config)?;
        self.ids = PageIdSource::above(max_page_id(&imported));
        self.config = imported;
        self.persist()?;
        Ok(&self.config)
    }

    /// Pretty-printed JSON of the current document, as written to
    /// `site-config.json` and offered for download.
    pub fn export_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(&self.config)?)
    }

    /// Render the live preview for the current document.
    pub fn preview(&self, fragment: Option<&str>) -> String {
        render::render_preview(&self.config, fragment)
    }

    /// Drop the persisted copy. The in-memory document is untouched.
    pub fn clear_saved(&mut self) -> Result<(), SessionError> {
        self.store.delete(CONFIG_KEY)?;
        Ok(())
    }

    fn persist(&mut self) -> Result<(), SessionError> {
        let text = serde_json::to_string(&self.config)?;
        self.store.set(CONFIG_KEY, &text)?;
        Ok(())
    }
}

fn max_page_id(config: &SiteConfig) -> PageId {
    config.pages.iter().map(|p| p.id).max().unwrap_or(0)
}
