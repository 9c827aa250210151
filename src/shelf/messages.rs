//! Command and response types for the content store ("Shelf").
//!
//! Every command is fire-and-forget: the coordinator posts it through
//! [`crate::app::Action::PostToShelf`] and never blocks. The Shelf reports the
//! outcome later as a [`ShelfResponse`], which re-enters the event loop as
//! [`crate::app::Event::ShelfResponse`]. Commands carry the trace context of the
//! span that produced them so both halves can be correlated in the trace file.

use crate::domain::{BookId, FilterId, NoteId};
use serde::{Deserialize, Serialize};

/// Distributed tracing context captured when a command is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the span that posted the command.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span is
    /// not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let context = tracing::Span::current().context();
        let span = context.span();
        let span_context = span.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Where pasted notes land relative to the target note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Place {
    Above,
    Below,
    Under,
}

/// Generates constructors that attach the current trace context.
macro_rules! shelf_command_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl ShelfCommand {
            $(
                #[doc = concat!("Builds a `", stringify!($variant), "` command with the current trace context.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

shelf_command_builders! {
    delete_notes(DeleteNotes { book_id: BookId, note_ids: Vec<NoteId> }),
    cut_notes(CutNotes { book_id: BookId, note_ids: Vec<NoteId> }),
    paste_notes(PasteNotes { book_id: BookId, note_id: NoteId, place: Place }),
    promote_notes(PromoteNotes { book_id: BookId, note_ids: Vec<NoteId> }),
    demote_notes(DemoteNotes { book_id: BookId, note_ids: Vec<NoteId> }),
    move_note(MoveNote { book_id: BookId, note_id: NoteId, offset: i32 }),
    sparse_tree(SparseTree { book_id: BookId, note_id: NoteId }),
    create_book(CreateBook { name: String }),
    rename_book(RenameBook { book_id: BookId, name: String }),
    delete_book(DeleteBook { book_id: BookId, delete_linked: bool }),
    export_book(ExportBook { book_id: BookId }),
    import_book(ImportBook { name: String, uri: String }),
    delete_filters(DeleteFilters { filter_ids: Vec<FilterId> }),
    move_filter(MoveFilter { filter_id: FilterId, offset: i32 }),
    sync_on_resume(SyncOnResume {}),
    sync_on_note_update(SyncOnNoteUpdate {}),
}

/// Commands posted to the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ShelfCommand {
    DeleteNotes {
        book_id: BookId,
        note_ids: Vec<NoteId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    CutNotes {
        book_id: BookId,
        note_ids: Vec<NoteId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    PasteNotes {
        book_id: BookId,
        note_id: NoteId,
        place: Place,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    PromoteNotes {
        book_id: BookId,
        note_ids: Vec<NoteId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    DemoteNotes {
        book_id: BookId,
        note_ids: Vec<NoteId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    MoveNote {
        book_id: BookId,
        note_id: NoteId,
        /// Positive moves down, negative moves up.
        offset: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    /// Unfold the path to a note so it is visible in the outline.
    SparseTree {
        book_id: BookId,
        note_id: NoteId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    CreateBook {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    RenameBook {
        book_id: BookId,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    DeleteBook {
        book_id: BookId,
        /// Also delete the linked remote copy.
        delete_linked: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    ExportBook {
        book_id: BookId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    /// Import an external document as a new book. The format is always Org.
    ImportBook {
        name: String,
        uri: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    DeleteFilters {
        filter_ids: Vec<FilterId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    MoveFilter {
        filter_id: FilterId,
        offset: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    SyncOnResume {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
    /// Re-sync after structural edits made in move mode.
    SyncOnNoteUpdate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl ShelfCommand {
    /// Short command name for logs and failure messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DeleteNotes { .. } => "delete_notes",
            Self::CutNotes { .. } => "cut_notes",
            Self::PasteNotes { .. } => "paste_notes",
            Self::PromoteNotes { .. } => "promote_notes",
            Self::DemoteNotes { .. } => "demote_notes",
            Self::MoveNote { .. } => "move_note",
            Self::SparseTree { .. } => "sparse_tree",
            Self::CreateBook { .. } => "create_book",
            Self::RenameBook { .. } => "rename_book",
            Self::DeleteBook { .. } => "delete_book",
            Self::ExportBook { .. } => "export_book",
            Self::ImportBook { .. } => "import_book",
            Self::DeleteFilters { .. } => "delete_filters",
            Self::MoveFilter { .. } => "move_filter",
            Self::SyncOnResume { .. } => "sync_on_resume",
            Self::SyncOnNoteUpdate { .. } => "sync_on_note_update",
        }
    }

    /// Whether the command restructures the outline (promote, demote, move).
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::PromoteNotes { .. } | Self::DemoteNotes { .. } | Self::MoveNote { .. }
        )
    }
}

/// Asynchronous outcomes reported by the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "response", rename_all = "snake_case")]
pub enum ShelfResponse {
    NotesDeleted { count: usize },
    NotesCut { count: usize },
    NotesPasted { count: usize },
    NotesMoved { count: usize },
    BookCreated { book_id: BookId },
    BookDeleted { book_id: BookId },
    BookExported { path: String },
    BookImported { book_id: BookId, name: String },
    /// Sync completed; `error` holds the failure message if it did not succeed.
    SyncFinished {
        #[serde(default)]
        error: Option<String>,
    },
    /// Any command failed.
    Failed { command: String, message: String },
}
