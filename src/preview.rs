//! Presenting rendered HTML to a preview surface.
//!
//! The surface (an iframe in the browser build, anything implementing
//! [`PreviewSurface`] here) has a one-shot initialization race: it may not
//! be ready the first time the session tries to show a preview. Presentation
//! retries a bounded number of times at a fixed short delay, then gives up
//! and reports the failure. The document model is never affected — a failed
//! present is a display problem, not a data problem.

use std::thread;
use std::time::Duration;

use thiserror::Error;

/// Attempts made before giving up on a not-ready surface.
pub const MAX_RETRIES: u32 = 3;
/// Pause between attempts.
pub const RETRY_DELAY: Duration = Duration::from_millis(100);

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("preview surface not ready after {MAX_RETRIES} retries")]
    NeverReady,
    #[error("preview surface rejected the document: {0}")]
    Failed(String),
}

/// Where rendered preview HTML ends up.
pub trait PreviewSurface {
    /// Whether the surface can accept a document right now.
    fn is_ready(&self) -> bool;
    /// Replace the surface's contents with `html`.
    fn present(&mut self, html: &str) -> Result<(), PreviewError>;
}

/// Present `html`, waiting out the surface's initialization race.
///
/// Not-ready surfaces are retried [`MAX_RETRIES`] times at [`RETRY_DELAY`]
/// intervals; a surface that never comes up yields
/// [`PreviewError::NeverReady`]. Errors from `present` itself are returned
/// as-is — only readiness is retried.
pub fn present_with_retry(
    surface: &mut dyn PreviewSurface,
    html: &str,
) -> Result<(), PreviewError> {
    let mut retries = 0;
    while !surface.is_ready() {
        if retries >= MAX_RETRIES {
            return Err(PreviewError::NeverReady);
        }
        retries += 1;
        thread::sleep(RETRY_DELAY);
    }
    surface.present(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface that reports not-ready for the first N checks.
    /// is_ready takes &self, so the countdown lives in a Cell.
    struct CountdownSurface(std::cell::Cell<u32>, Option<String>);

    impl CountdownSurface {
        fn ready_after(checks: u32) -> Self {
            Self(std::cell::Cell::new(checks), None)
        }
    }

    impl PreviewSurface for CountdownSurface {
        fn is_ready(&self) -> bool {
            let left = self.0.get();
            if left == 0 {
                true
            } else {
                self.0.set(left - 1);
                false
            }
        }

        fn present(&mut self, html: &str) -> Result<(), PreviewError> {
            self.1 = Some(html.to_string());
            Ok(())
        }
    }

    #[test]
    fn ready_surface_presents_immediately() {
        let mut surface = CountdownSurface::ready_after(0);
        present_with_retry(&mut surface, "<html>").unwrap();
        assert_eq!(surface.1.as_deref(), Some("<html>"));
    }

    #[test]
    fn surface_ready_on_last_retry_succeeds() {
        let mut surface = CountdownSurface::ready_after(MAX_RETRIES);
        present_with_retry(&mut surface, "<html>").unwrap();
        assert_eq!(surface.1.as_deref(), Some("<html>"));
    }

    #[test]
    fn never_ready_surface_fails_after_bounded_retries() {
        let mut surface = CountdownSurface::ready_after(u32::MAX);
        let err = present_with_retry(&mut surface, "<html>").unwrap_err();
        assert!(matches!(err, PreviewError::NeverReady));
        assert!(surface.1.is_none());
    }
}
