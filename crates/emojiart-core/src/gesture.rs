//! Gesture events delivered by the host platform.
//!
//! The host recognizes drags, pinches and taps and has already hit-tested
//! them: each event says whether it landed on the canvas background or on a
//! specific emoji.

use crate::document::EmojiId;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// What a gesture was hit-tested onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureTarget {
    Canvas,
    Emoji(EmojiId),
}

/// Progress of a continuous gesture.
///
/// Zero or more `Changed` values are followed by exactly one `Ended` (or a
/// `Cancelled`). Only `Ended` commits anything to the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Phase<T> {
    Changed(T),
    Ended(T),
    Cancelled,
}

/// A gesture notification from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// Drag with its total translation since the drag began, in screen units.
    Drag {
        target: GestureTarget,
        phase: Phase<Vec2>,
    },
    /// Pinch with its total scale factor since the pinch began.
    Pinch { phase: Phase<f64> },
    /// Completed tap. `count` is 1 for a single tap, 2 for a double tap.
    Tap { target: GestureTarget, count: u32 },
}
