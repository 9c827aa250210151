//! Contextual action surface lifecycle.
//!
//! The [`ActionModeController`] derives whether a contextual action surface
//! (toolbar shown while items are selected) should exist from the selection
//! count alone. It is generic over panes: what the surface can do is carried by
//! the caller-supplied [`ActionDescriptor`], never by the controller.
//!
//! # State Machine
//!
//! | state     | count == 0              | count > 0                       |
//! |-----------|-------------------------|---------------------------------|
//! | Inactive  | Inactive                | Active, start surface           |
//! | Active    | Finishing, finish it    | Active, invalidate surface      |
//! | Finishing | Inactive                | Active, start a new surface     |
//!
//! Closing is asynchronous on the host side. The host reports the destroyed
//! surface through [`ActionModeController::on_closed`], which finalizes the
//! close and hands back the surface tag so deferred pane effects can run.
//!
//! # Example
//!
//! ```rust
//! use panenav::app::action_mode::{ActionDescriptor, ActionModeController, SurfaceCommand};
//! use panenav::app::modes::PaneKind;
//!
//! let descriptor = ActionDescriptor::for_pane(PaneKind::Book).unwrap();
//! let mut controller = ActionModeController::new();
//!
//! assert!(matches!(controller.update(1, &descriptor), Some(SurfaceCommand::Start { .. })));
//! assert!(matches!(controller.update(2, &descriptor), Some(SurfaceCommand::Invalidate { .. })));
//! assert!(matches!(controller.update(0, &descriptor), Some(SurfaceCommand::Finish { .. })));
//! ```

use super::modes::PaneKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Host-side handle key for one contextual action surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// What kind of entries the surface acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Book,
    Note,
    Filter,
}

/// A command the surface may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOp {
    Paste,
    Promote,
    Demote,
    Move,
    Cut,
    Delete,
    SetState,
    Schedule,
    Export,
    Rename,
}

/// Marks surfaces whose closing triggers a pane-specific deferred effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceTag {
    /// Structural editing mode (promote, demote, move). Closing it after such
    /// a request asks the content store to re-sync.
    Move,
}

/// Capability set of a contextual action surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub kind: SurfaceKind,
    pub allowed_ops: BTreeSet<ActionOp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<SurfaceTag>,
}

impl ActionDescriptor {
    #[must_use]
    pub fn new(kind: SurfaceKind, ops: impl IntoIterator<Item = ActionOp>) -> Self {
        Self {
            kind,
            allowed_ops: ops.into_iter().collect(),
            tag: None,
        }
    }

    #[must_use]
    pub const fn with_tag(mut self, tag: SurfaceTag) -> Self {
        self.tag = Some(tag);
        self
    }

    #[must_use]
    pub fn allows(&self, op: ActionOp) -> bool {
        self.allowed_ops.contains(&op)
    }

    /// Default descriptor for a list pane, or `None` for panes without selection.
    ///
    /// Panes may supply their own descriptor with a toggle (for example the
    /// book outline's structural move mode); this is the fallback.
    #[must_use]
    pub fn for_pane(kind: PaneKind) -> Option<Self> {
        use ActionOp::{Cut, Delete, Demote, Export, Paste, Promote, Rename, Schedule, SetState};

        match kind {
            PaneKind::Books => Some(Self::new(SurfaceKind::Book, [Delete, Export, Rename])),
            PaneKind::Book => Some(Self::new(
                SurfaceKind::Note,
                [Paste, Promote, Demote, Cut, Delete, SetState, Schedule],
            )),
            PaneKind::Query => Some(Self::new(SurfaceKind::Note, [SetState, Schedule, Delete])),
            PaneKind::Filters => Some(Self::new(SurfaceKind::Filter, [Delete])),
            PaneKind::Note | PaneKind::Settings => None,
        }
    }

    /// Structural move mode of the book outline.
    #[must_use]
    pub fn structural_move() -> Self {
        Self::new(
            SurfaceKind::Note,
            [ActionOp::Promote, ActionOp::Demote, ActionOp::Move],
        )
        .with_tag(SurfaceTag::Move)
    }
}

/// Lifecycle state of the contextual action surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionModeState {
    Inactive,
    Active { count: usize, surface: SurfaceId },
    Finishing { surface: SurfaceId },
}

/// Command for the action-surface host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SurfaceCommand {
    Start {
        surface: SurfaceId,
        descriptor: ActionDescriptor,
    },
    /// Refresh the surface content (selection count changed).
    Invalidate { surface: SurfaceId, count: usize },
    Finish { surface: SurfaceId },
}

/// Outcome of a surface close notification that was not stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedSurface {
    pub surface: SurfaceId,
    pub tag: Option<SurfaceTag>,
    /// The host closed a surface the controller still considered active
    /// (user dismissed it). The selection must be cleared to match.
    pub host_initiated: bool,
}

#[derive(Debug, Clone)]
pub struct ActionModeController {
    state: ActionModeState,
    active_tag: Option<SurfaceTag>,
    /// Surfaces asked to finish whose close notification has not arrived yet.
    closing: Vec<(SurfaceId, Option<SurfaceTag>)>,
    next_surface: u64,
}

impl Default for ActionModeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionModeController {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ActionModeState::Inactive,
            active_tag: None,
            closing: Vec::new(),
            next_surface: 1,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ActionModeState {
        self.state
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, ActionModeState::Active { .. })
    }

    /// Surface currently shown, if any.
    #[must_use]
    pub const fn active_surface(&self) -> Option<SurfaceId> {
        match self.state {
            ActionModeState::Active { surface, .. } => Some(surface),
            _ => None,
        }
    }

    /// Advances the state machine with the new selection count.
    ///
    /// Returns the host command implied by the transition, if any.
    pub fn update(&mut self, count: usize, descriptor: &ActionDescriptor) -> Option<SurfaceCommand> {
        let _span = tracing::debug_span!("action_mode_update", count, state = ?self.state).entered();

        match (self.state, count) {
            (ActionModeState::Inactive, 0) => None,
            (ActionModeState::Finishing { .. }, 0) => {
                self.state = ActionModeState::Inactive;
                None
            }
            (ActionModeState::Inactive | ActionModeState::Finishing { .. }, count) => {
                Some(self.start(count, descriptor))
            }
            (ActionModeState::Active { .. }, 0) => self.finish(),
            (ActionModeState::Active { surface, .. }, count) => {
                self.state = ActionModeState::Active { count, surface };
                Some(SurfaceCommand::Invalidate { surface, count })
            }
        }
    }

    /// Requests the active surface to close regardless of the selection count.
    pub fn finish(&mut self) -> Option<SurfaceCommand> {
        let ActionModeState::Active { surface, .. } = self.state else {
            return None;
        };

        tracing::debug!(%surface, "finishing action surface");
        self.closing.push((surface, self.active_tag.take()));
        self.state = ActionModeState::Finishing { surface };
        Some(SurfaceCommand::Finish { surface })
    }

    /// Handles the host's asynchronous "surface destroyed" notification.
    ///
    /// Returns `None` for surfaces the controller no longer tracks.
    pub fn on_closed(&mut self, surface: SurfaceId) -> Option<ClosedSurface> {
        if let Some(pos) = self.closing.iter().position(|(id, _)| *id == surface) {
            let (_, tag) = self.closing.remove(pos);
            if self.state == (ActionModeState::Finishing { surface }) {
                self.state = ActionModeState::Inactive;
            }
            tracing::debug!(%surface, ?tag, "action surface closed");
            return Some(ClosedSurface {
                surface,
                tag,
                host_initiated: false,
            });
        }

        if self.active_surface() == Some(surface) {
            self.state = ActionModeState::Inactive;
            let tag = self.active_tag.take();
            tracing::debug!(%surface, ?tag, "action surface dismissed by host");
            return Some(ClosedSurface {
                surface,
                tag,
                host_initiated: true,
            });
        }

        tracing::debug!(%surface, "ignoring close of untracked action surface");
        None
    }

    /// Forgets every surface after the host was torn down.
    ///
    /// Surface ids keep increasing so a late notification for a surface of
    /// the old host can never match a new one.
    pub fn reset(&mut self) {
        self.state = ActionModeState::Inactive;
        self.active_tag = None;
        self.closing.clear();
    }

    fn start(&mut self, count: usize, descriptor: &ActionDescriptor) -> SurfaceCommand {
        let surface = SurfaceId(self.next_surface);
        self.next_surface += 1;
        self.state = ActionModeState::Active { count, surface };
        self.active_tag = descriptor.tag;

        tracing::debug!(%surface, kind = ?descriptor.kind, "starting action surface");
        SurfaceCommand::Start {
            surface,
            descriptor: descriptor.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes() -> ActionDescriptor {
        ActionDescriptor::for_pane(PaneKind::Book).unwrap()
    }

    fn starts(commands: &[Option<SurfaceCommand>]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, Some(SurfaceCommand::Start { .. })))
            .count()
    }

    #[test]
    fn zero_count_while_inactive_creates_nothing() {
        let mut controller = ActionModeController::new();
        assert_eq!(controller.update(0, &notes()), None);
        assert_eq!(controller.state(), ActionModeState::Inactive);
    }

    #[test]
    fn positive_count_starts_exactly_one_surface() {
        let mut controller = ActionModeController::new();
        let commands = vec![
            controller.update(1, &notes()),
            controller.update(3, &notes()),
            controller.update(2, &notes()),
        ];

        assert_eq!(starts(&commands), 1);
        assert_eq!(
            commands[2],
            Some(SurfaceCommand::Invalidate { surface: SurfaceId(1), count: 2 })
        );
        assert_eq!(
            controller.state(),
            ActionModeState::Active { count: 2, surface: SurfaceId(1) }
        );
    }

    #[test]
    fn dropping_to_zero_finishes_then_close_finalizes() {
        let mut controller = ActionModeController::new();
        controller.update(1, &notes());

        assert_eq!(
            controller.update(0, &notes()),
            Some(SurfaceCommand::Finish { surface: SurfaceId(1) })
        );
        assert_eq!(controller.state(), ActionModeState::Finishing { surface: SurfaceId(1) });

        let closed = controller.on_closed(SurfaceId(1)).unwrap();
        assert!(!closed.host_initiated);
        assert_eq!(controller.state(), ActionModeState::Inactive);
    }

    #[test]
    fn zero_while_finishing_goes_inactive_and_close_still_reports_tag() {
        let mut controller = ActionModeController::new();
        controller.update(1, &ActionDescriptor::structural_move());
        controller.update(0, &notes());

        assert_eq!(controller.update(0, &notes()), None);
        assert_eq!(controller.state(), ActionModeState::Inactive);

        let closed = controller.on_closed(SurfaceId(1)).unwrap();
        assert_eq!(closed.tag, Some(SurfaceTag::Move));
    }

    #[test]
    fn reselect_while_finishing_opens_a_new_surface() {
        let mut controller = ActionModeController::new();
        controller.update(1, &notes());
        controller.update(0, &notes());

        assert!(matches!(
            controller.update(1, &notes()),
            Some(SurfaceCommand::Start { surface: SurfaceId(2), .. })
        ));

        // Late close of the first surface must not tear down the second one.
        assert!(controller.on_closed(SurfaceId(1)).is_some());
        assert_eq!(controller.active_surface(), Some(SurfaceId(2)));
    }

    #[test]
    fn host_dismissal_of_active_surface_is_reported() {
        let mut controller = ActionModeController::new();
        controller.update(2, &notes());

        let closed = controller.on_closed(SurfaceId(1)).unwrap();
        assert!(closed.host_initiated);
        assert_eq!(controller.state(), ActionModeState::Inactive);
    }

    #[test]
    fn unknown_close_is_stale() {
        let mut controller = ActionModeController::new();
        controller.update(1, &notes());
        assert_eq!(controller.on_closed(SurfaceId(99)), None);
        assert!(controller.is_active());
    }

    #[test]
    fn reset_keeps_surface_ids_unique() {
        let mut controller = ActionModeController::new();
        controller.update(1, &notes());
        controller.reset();

        assert_eq!(controller.on_closed(SurfaceId(1)), None);
        assert!(matches!(
            controller.update(1, &notes()),
            Some(SurfaceCommand::Start { surface: SurfaceId(2), .. })
        ));
    }

    #[test]
    fn finish_without_active_surface_is_noop() {
        let mut controller = ActionModeController::new();
        assert_eq!(controller.finish(), None);
    }

    #[test]
    fn descriptors_follow_pane_kind() {
        assert_eq!(ActionDescriptor::for_pane(PaneKind::Filters).unwrap().kind, SurfaceKind::Filter);
        assert!(ActionDescriptor::for_pane(PaneKind::Book).unwrap().allows(ActionOp::Paste));
        assert!(ActionDescriptor::for_pane(PaneKind::Note).is_none());
    }
}
