//! Navigation drawer slide debouncing.
//!
//! The drawer reports its position as a continuous offset in `0.0..=1.0` many
//! times per gesture. [`DrawerSlideState`] reduces that stream to exactly one
//! [`DrawerEdge::Opened`] and one [`DrawerEdge::Closed`] per physical gesture
//! with a three-phase machine that only moves at the two boundaries:
//!
//! ```text
//!            offset > 0                offset == 0
//! Unknown ──────────────▶ Opened ───────────────▶ Closed
//!    │                      ▲                        │
//!    └── offset == 0 ──▶ Closed ── offset > 0 ───────┘
//! ```
//!
//! It also owns the logical "drawer is open" flag that the title bar and the
//! router consult.

use serde::{Deserialize, Serialize};

/// Debouncer phase. Starts [`DrawerPhase::Unknown`] until the first sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerPhase {
    #[default]
    Unknown,
    Closed,
    Opened,
}

/// Discrete edge event derived from the slide offset stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawerEdge {
    Opened,
    Closed,
}

#[derive(Debug, Clone, Default)]
pub struct DrawerSlideState {
    phase: DrawerPhase,
    last_offset: Option<f32>,
    open: bool,
}

impl DrawerSlideState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> DrawerPhase {
        self.phase
    }

    #[must_use]
    pub const fn last_offset(&self) -> Option<f32> {
        self.last_offset
    }

    /// Logical open flag. Follows the edge events, and the explicit
    /// [`mark_open`](Self::mark_open) / [`mark_closed`](Self::mark_closed) calls.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Feeds one slide sample. Returns an edge only when the phase changes.
    ///
    /// Samples that are negative or NaN fall outside both boundary conditions
    /// and leave the phase untouched.
    pub fn on_slide(&mut self, offset: f32) -> Option<DrawerEdge> {
        self.last_offset = Some(offset);

        let edge = match self.phase {
            DrawerPhase::Unknown if offset == 0.0 => Some(DrawerEdge::Closed),
            DrawerPhase::Unknown | DrawerPhase::Closed if offset > 0.0 => Some(DrawerEdge::Opened),
            DrawerPhase::Opened if offset == 0.0 => Some(DrawerEdge::Closed),
            _ => None,
        };

        match edge {
            Some(DrawerEdge::Opened) => {
                self.phase = DrawerPhase::Opened;
                self.open = true;
            }
            Some(DrawerEdge::Closed) => {
                self.phase = DrawerPhase::Closed;
                self.open = false;
            }
            None => {}
        }

        if let Some(edge) = edge {
            tracing::debug!(?edge, offset, "drawer edge");
        }
        edge
    }

    /// Marks the drawer logically open without touching the debouncer phase.
    ///
    /// Used when the drawer is opened programmatically before any slide sample.
    pub fn mark_open(&mut self) {
        self.open = true;
    }

    /// Marks the drawer logically closed without touching the debouncer phase,
    /// so the closing gesture still yields its `Closed` edge.
    pub fn mark_closed(&mut self) {
        self.open = false;
    }
}
