//! # Simple Site
//!
//! The core engine of a form-driven static-site builder. A user edits site
//! metadata, a list of pages, and image galleries; the engine keeps the
//! document consistent, renders a live preview, and exports a complete
//! static HTML bundle. There is no server — state lives in the session and
//! in whatever key-value store the host provides.
//!
//! # Architecture: Model → Mutate → Render
//!
//! The engine is built around one value type and two families of pure
//! functions over it:
//!
//! ```text
//! UI event → snapshot → Mutation Engine → new SiteConfig
//!                                          ├→ Render Pipeline (preview / export)
//!                                          └→ Persistence Adapter (saved blob)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Undo is free**: every mutation produces a new value, so history is a
//!   stack of serialized snapshots with no diffing or patching.
//! - **Rendering can't corrupt**: the render pipeline only ever reads; a
//!   failed preview leaves the document exactly as it was.
//! - **Testability**: model, mutations, and rendering are pure functions —
//!   the whole core tests without a browser, a DOM, or a filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | The document value types (`SiteConfig`, `Page`, `ImageRef`) and partial update/validation |
//! | [`mutate`] | Pure mutation operations plus the monotonic page id source |
//! | [`history`] | Undo/redo stacks over serialized snapshots |
//! | [`session`] | The state container: dispatch = snapshot → mutate → persist |
//! | [`render`] | Preview document, per-page exports, gallery fragments, site packaging |
//! | [`theme`] | Static theme registry — base CSS plus named theme fragments |
//! | [`store`] | Key-value persistence boundary with memory and file implementations |
//! | [`debounce`] | Coalesces bursty text edits into one commit per quiet period |
//! | [`preview`] | Preview surface boundary with bounded-retry presentation |
//! | [`output`] | CLI output formatting — inventory-style display of results |
//!
//! # Design Decisions
//!
//! ## Client-Side Markdown
//!
//! Generated sites ship Markdown source, not rendered HTML: every content
//! block carries its source in a `data-markdown` attribute, and a small
//! bootstrap script loads marked from a CDN and converts in the browser.
//! The engine never needs a Markdown renderer of its own, and exported
//! documents stay editable by hand.
//!
//! ## Maud Over String Templates
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system — malformed markup is a build error and template
//! variables are plain Rust expressions. One deliberate exception to Maud's
//! escape-by-default: user-entered text is spliced verbatim (`PreEscaped`)
//! because exported sites have always reflected exactly what the user typed,
//! inline HTML included. See [`render`] for the limitation note.
//!
//! ## Serialized Snapshots for History
//!
//! Undo/redo stores JSON strings, not live values. A restored state is
//! structurally independent of anything mutated since, the stacks are cheap
//! to inspect, and the same serialization path feeds persistence, import,
//! export, and the packaged `site-config.json` — one format everywhere.
//!
//! ## Lenient on Read, Normalized on Write
//!
//! Documents persisted by older builds may lack newer fields or carry
//! gallery images as bare URL strings. Deserialization defaults what is
//! missing and accepts both image forms; mutations normalize an entry to
//! the structured `{url, title}` form the first time they touch it. No
//! migration step, no version field.

pub mod debounce;
pub mod history;
pub mod model;
pub mod mutate;
pub mod output;
pub mod preview;
pub mod render;
pub mod session;
pub mod store;
pub mod theme;
