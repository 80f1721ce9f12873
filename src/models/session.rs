// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback and labeling mode.
//!
//! Playing and labeling are mutually exclusive, so both live in a single
//! [`Mode`] enum instead of two flags. The drag-to-draw state machine only
//! exists inside [`Mode::Labeling`], which can only be reached while paused.

use crate::config::MIN_BOX_SIZE;
use crate::util::geometry::{DisplayPoint, DisplayRect};

/// Drag state while labeling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drawing {
    Idle,
    Dragging {
        start: DisplayPoint,
        /// `None` until the pointer moves after the press.
        current: Option<DisplayRect>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Playing,
    Paused,
    Labeling(Drawing),
}

#[derive(Debug)]
pub struct Session {
    mode: Mode,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self { mode: Mode::Paused }
    }

    #[cfg(test)]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.mode, Mode::Playing)
    }

    pub fn is_labeling(&self) -> bool {
        matches!(self.mode, Mode::Labeling(_))
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, Mode::Labeling(Drawing::Dragging { .. }))
    }

    /// The rectangle being dragged, in display space.
    pub fn in_progress_rect(&self) -> Option<DisplayRect> {
        match self.mode {
            Mode::Labeling(Drawing::Dragging { current, .. }) => current,
            _ => None,
        }
    }

    /// Start playback. Leaves labeling mode and drops any drag.
    pub fn play(&mut self) {
        if self.is_labeling() {
            log::info!("Playback started, leaving labeling mode");
        }
        self.mode = Mode::Playing;
    }

    pub fn pause(&mut self) {
        if self.is_playing() {
            self.mode = Mode::Paused;
        }
    }

    /// Enter or leave labeling mode. Entering while playing pauses playback.
    pub fn toggle_labeling(&mut self) {
        self.mode = match self.mode {
            Mode::Playing | Mode::Paused => Mode::Labeling(Drawing::Idle),
            Mode::Labeling(_) => Mode::Paused,
        };
    }

    /// Pointer pressed on the canvas. Ignored unless labeling.
    pub fn pointer_down(&mut self, pos: DisplayPoint) {
        if let Mode::Labeling(_) = self.mode {
            self.mode = Mode::Labeling(Drawing::Dragging {
                start: pos,
                current: None,
            });
        }
    }

    pub fn pointer_move(&mut self, pos: DisplayPoint) {
        if let Mode::Labeling(Drawing::Dragging { start, .. }) = self.mode {
            self.mode = Mode::Labeling(Drawing::Dragging {
                start,
                current: Some(DisplayRect::spanning(start, pos)),
            });
        }
    }

    /// Pointer released or left the canvas.
    ///
    /// Returns the finished rectangle when it is large enough to be a box
    /// rather than a click.
    pub fn pointer_up(&mut self) -> Option<DisplayRect> {
        let Mode::Labeling(Drawing::Dragging { current, .. }) = self.mode else {
            return None;
        };
        self.mode = Mode::Labeling(Drawing::Idle);

        match current {
            Some(rect) if rect.is_at_least(MIN_BOX_SIZE) => Some(rect),
            Some(rect) => {
                log::debug!("Discarded {:.1}x{:.1} drag", rect.width, rect.height);
                None
            }
            None => None,
        }
    }

    /// Abandon the current drag without creating a box.
    pub fn cancel_drag(&mut self) {
        if self.is_dragging() {
            self.mode = Mode::Labeling(Drawing::Idle);
        }
    }

    /// Back to the initial paused state (new video).
    pub fn reset(&mut self) {
        self.mode = Mode::Paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeling() -> Session {
        let mut session = Session::new();
        session.toggle_labeling();
        session
    }

    fn drag(session: &mut Session, from: (f32, f32), to: (f32, f32)) -> Option<DisplayRect> {
        session.pointer_down(DisplayPoint::new(from.0, from.1));
        session.pointer_move(DisplayPoint::new(to.0, to.1));
        session.pointer_up()
    }

    #[test]
    fn test_starts_paused() {
        let session = Session::new();
        assert_eq!(session.mode(), Mode::Paused);
    }

    #[test]
    fn test_labeling_while_playing_pauses() {
        let mut session = Session::new();
        session.play();
        session.toggle_labeling();
        assert!(session.is_labeling());
        assert!(!session.is_playing());
    }

    #[test]
    fn test_play_leaves_labeling() {
        let mut session = labeling();
        session.pointer_down(DisplayPoint::new(1.0, 1.0));
        session.play();
        assert!(session.is_playing());
        assert!(!session.is_labeling());
        assert!(session.in_progress_rect().is_none());
    }

    #[test]
    fn test_toggle_off_returns_to_paused() {
        let mut session = labeling();
        session.toggle_labeling();
        assert_eq!(session.mode(), Mode::Paused);
    }

    #[test]
    fn test_pointer_ignored_outside_labeling() {
        let mut session = Session::new();
        assert!(drag(&mut session, (0.0, 0.0), (100.0, 100.0)).is_none());
        assert_eq!(session.mode(), Mode::Paused);

        session.play();
        assert!(drag(&mut session, (0.0, 0.0), (100.0, 100.0)).is_none());
        assert!(session.is_playing());
    }

    #[test]
    fn test_drag_produces_rect() {
        let mut session = labeling();
        let rect = drag(&mut session, (300.0, 150.0), (100.0, 50.0)).unwrap();
        assert_eq!(
            rect,
            DisplayRect {
                x: 100.0,
                y: 50.0,
                width: 200.0,
                height: 100.0,
            }
        );
        assert_eq!(session.mode(), Mode::Labeling(Drawing::Idle));
    }

    #[test]
    fn test_in_progress_rect_follows_pointer() {
        let mut session = labeling();
        session.pointer_down(DisplayPoint::new(10.0, 10.0));
        assert!(session.is_dragging());
        assert!(session.in_progress_rect().is_none());

        session.pointer_move(DisplayPoint::new(40.0, 30.0));
        session.pointer_move(DisplayPoint::new(0.0, 0.0));
        let rect = session.in_progress_rect().unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_small_drags_discarded() {
        let mut session = labeling();
        assert!(drag(&mut session, (10.0, 10.0), (14.9, 100.0)).is_none());
        assert!(drag(&mut session, (10.0, 10.0), (100.0, 14.0)).is_none());
        assert!(drag(&mut session, (10.0, 10.0), (15.0, 15.0)).is_some());
        assert!(session.is_labeling());
    }

    #[test]
    fn test_release_without_move() {
        let mut session = labeling();
        session.pointer_down(DisplayPoint::new(10.0, 10.0));
        assert!(session.pointer_up().is_none());
        assert_eq!(session.mode(), Mode::Labeling(Drawing::Idle));
    }

    #[test]
    fn test_cancel_drag() {
        let mut session = labeling();
        session.pointer_down(DisplayPoint::new(10.0, 10.0));
        session.pointer_move(DisplayPoint::new(90.0, 90.0));
        session.cancel_drag();
        assert!(session.pointer_up().is_none());
        assert!(session.is_labeling());
    }

    #[test]
    fn test_pause_only_affects_playing() {
        let mut session = labeling();
        session.pause();
        assert!(session.is_labeling());

        session.play();
        session.pause();
        assert_eq!(session.mode(), Mode::Paused);
    }

    #[test]
    fn test_reset() {
        let mut session = labeling();
        session.pointer_down(DisplayPoint::new(1.0, 1.0));
        session.reset();
        assert_eq!(session.mode(), Mode::Paused);
    }
}
