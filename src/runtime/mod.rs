//! Single-threaded event loop around the coordinator.
//!
//! [`Runtime`] owns the [`AppState`], a [`Host`] and a [`Scheduler`]. Each
//! event is handled to completion before the next one starts. Broadcasts and
//! scheduled tasks produced by the handler re-enter the same queue, so ordering
//! stays deterministic.
//!
//! ```text
//! host event ──▶ queue ──▶ handle_event ──▶ actions ──▶ Host
//!                  ▲                          │
//!                  ├──── Broadcast ───────────┤
//!                  └──── Scheduler ◀─ Schedule┘
//! ```

pub mod host;
pub mod recording;
pub mod scheduler;

pub use host::{Chrome, ContentStore, Host, HostQuery, PaneManager, SurfaceHost};
pub use recording::RecordingHost;
pub use scheduler::Scheduler;

use crate::app::action_mode::SurfaceCommand;
use crate::app::{handle_event, Action, AppState, Event};
use crate::domain::error::Result;
use std::collections::VecDeque;
use std::time::Duration;

pub struct Runtime<H: Host> {
    state: AppState,
    host: H,
    scheduler: Scheduler,
}

impl<H: Host> Runtime<H> {
    #[must_use]
    pub fn new(state: AppState, host: H) -> Self {
        Self {
            state,
            host,
            scheduler: Scheduler::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Handles `event` and everything it triggers synchronously.
    ///
    /// Returns `true` if the coordinator state changed. Handler and host
    /// errors are logged and do not stop the queue.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let mut queue = VecDeque::from([event]);
        let mut changed = false;

        while let Some(event) = queue.pop_front() {
            let span = tracing::debug_span!("runtime_dispatch", queued = queue.len());
            let _guard = span.entered();

            match handle_event(&mut self.state, &self.host, &event) {
                Ok((state_changed, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        state_changed,
                        "event handled successfully"
                    );
                    changed |= state_changed;
                    for action in actions {
                        if let Err(error) = self.execute_action(action, &mut queue) {
                            tracing::warn!(%error, "host rejected action");
                        }
                    }
                }
                Err(error) => {
                    tracing::debug!(%error, "error handling event");
                }
            }
        }

        changed
    }

    /// Advances the virtual clock and dispatches every task that came due.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let due = self.scheduler.advance(elapsed);
        let mut changed = false;
        for task in due {
            changed |= self.dispatch(Event::ScheduledTaskFired { task });
        }
        changed
    }

    fn execute_action(&mut self, action: Action, queue: &mut VecDeque<Event>) -> Result<()> {
        tracing::trace!(?action, "executing action");

        match action {
            Action::Show {
                pane,
                add_to_backstack,
            } => self.host.show(&pane, add_to_backstack)?,
            Action::ClearPanes => self.host.clear_all()?,
            Action::Surface { command } => match command {
                SurfaceCommand::Start {
                    surface,
                    descriptor,
                } => self.host.start_surface(surface, &descriptor)?,
                SurfaceCommand::Invalidate { surface, count } => {
                    self.host.invalidate_surface(surface, count);
                }
                SurfaceCommand::Finish { surface } => self.host.finish_surface(surface),
            },
            Action::SetTitle { text } => self.host.set_title(&text),
            Action::ApplyPaneChrome {
                kind,
                selection_count,
            } => self.host.apply_pane_chrome(kind, selection_count),
            Action::InvalidateOptionsMenu { visible } => self.host.set_options_menu_visible(visible),
            Action::CloseKeyboard => self.host.close_keyboard(),
            Action::OpenDrawer => self.host.open_drawer(),
            Action::CloseDrawer => self.host.close_drawer(),
            Action::CollapseSearch => self.host.collapse_search(),
            Action::SetSearchQuery { query } => self.host.set_search_query(&query),
            Action::NavigateBack => self.host.navigate_back(),
            Action::Schedule { delay_ms, task } => {
                self.scheduler.schedule(Duration::from_millis(delay_ms), task);
            }
            Action::Broadcast { intent } => queue.push_back(Event::Broadcast { intent }),
            Action::PostToShelf(command) => self.host.post(&command)?,
            Action::Notify { message } => self.host.notify(&message),
            Action::PromptImport { import } => self.host.prompt_import(&import),
        }
        Ok(())
    }
}
