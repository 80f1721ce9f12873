// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Copying the JSON export to the clipboard.
//!
//! The system clipboard is tried first; if it is unavailable the text is
//! handed to egui's platform output instead.

use anyhow::{Context, Result};
use std::time::{Duration, Instant};

/// Something text can be copied into.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The operating system clipboard.
///
/// The arboard handle is opened on first use and kept for the lifetime of
/// the app: on X11 the copied text is only served while it is alive.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard> {
        if self.handle.is_none() {
            self.handle = Some(arboard::Clipboard::new().context("Clipboard unavailable")?);
        }
        self.handle.as_mut().context("Clipboard unavailable")
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.handle()?.set_text(text.to_owned())?;
        Ok(())
    }
}

/// Copy through egui's platform output, applied by eframe at the end of the frame.
pub struct EguiClipboard<'a>(pub &'a egui::Context);

impl ClipboardSink for EguiClipboard<'_> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.0.output_mut(|o| o.copied_text = text.to_owned());
        Ok(())
    }
}

/// Copy `text` to `primary`, falling back to `fallback` if that fails.
///
/// Errors only when both sinks fail.
pub fn copy_text(
    text: &str,
    primary: &mut dyn ClipboardSink,
    fallback: &mut dyn ClipboardSink,
) -> Result<()> {
    match primary.set_text(text) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::warn!("System clipboard failed ({:#}), using fallback", e);
            fallback
                .set_text(text)
                .context("Failed to copy to clipboard")
        }
    }
}

/// The transient "Copied!" indicator.
#[derive(Debug)]
pub struct CopyIndicator {
    copied_at: Option<Instant>,
    duration: Duration,
}

impl CopyIndicator {
    pub fn new(duration: Duration) -> Self {
        Self {
            copied_at: None,
            duration,
        }
    }

    /// Start (or restart) the indicator.
    pub fn mark(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.remaining(now).is_some()
    }

    /// Time left before the indicator reverts.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.copied_at?);
        self.duration.checked_sub(elapsed).filter(|d| !d.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    #[derive(Default)]
    struct Recorder {
        text: Option<String>,
        fail: bool,
    }

    impl ClipboardSink for Recorder {
        fn set_text(&mut self, text: &str) -> Result<()> {
            if self.fail {
                bail!("denied");
            }
            self.text = Some(text.to_owned());
            Ok(())
        }
    }

    fn failing() -> Recorder {
        Recorder {
            fail: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_primary_used_when_available() {
        let mut primary = Recorder::default();
        let mut fallback = Recorder::default();
        copy_text("[]", &mut primary, &mut fallback).unwrap();
        assert_eq!(primary.text.as_deref(), Some("[]"));
        assert!(fallback.text.is_none());
    }

    #[test]
    fn test_fallback_on_primary_failure() {
        let mut primary = failing();
        let mut fallback = Recorder::default();
        copy_text("[]", &mut primary, &mut fallback).unwrap();
        assert_eq!(fallback.text.as_deref(), Some("[]"));
    }

    #[test]
    fn test_error_when_both_fail() {
        let err = copy_text("[]", &mut failing(), &mut failing()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to copy to clipboard");
    }

    #[test]
    fn test_system_clipboard_keeps_handle() {
        let mut clipboard = SystemClipboard::new();
        assert!(!clipboard.is_open());

        // Headless machines have no clipboard; either way the outcome must
        // match whether a handle is being held.
        match clipboard.set_text("[]") {
            Ok(()) => {
                assert!(clipboard.is_open());
                clipboard.set_text("[1]").unwrap();
                assert!(clipboard.is_open());
            }
            Err(_) => assert!(!clipboard.is_open()),
        }
    }

    #[test]
    fn test_indicator_expires() {
        let start = Instant::now();
        let mut indicator = CopyIndicator::new(Duration::from_secs(2));
        assert!(!indicator.is_active(start));

        indicator.mark(start);
        assert!(indicator.is_active(start));
        assert!(indicator.is_active(start + Duration::from_millis(1999)));
        assert!(!indicator.is_active(start + Duration::from_secs(2)));
        assert!(!indicator.is_active(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_indicator_restarts() {
        let start = Instant::now();
        let mut indicator = CopyIndicator::new(Duration::from_secs(2));
        indicator.mark(start);
        indicator.mark(start + Duration::from_millis(1500));

        let later = start + Duration::from_millis(3000);
        assert!(indicator.is_active(later));
        assert_eq!(indicator.remaining(later), Some(Duration::from_millis(500)));
    }
}
