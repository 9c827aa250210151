use panenav::app::action_mode::{ActionDescriptor, SurfaceCommand, SurfaceId};
use panenav::app::router::{DrawerItem, Intent};
use panenav::app::title_bar::TitleText;
use panenav::domain::{BookId, ItemId, NoteId, NoteRef};
use panenav::runtime::{RecordingHost, Runtime};
use panenav::shelf::{ShelfCommand, ShelfResponse};
use panenav::{initialize, Action, Config, Event, Pane};
use std::time::Duration;

fn runtime() -> Runtime<RecordingHost> {
    let mut host = RecordingHost::new();
    host.add_note(NoteRef {
        id: NoteId(42),
        book_id: BookId(7),
    });
    host.add_book(BookId(7), "Work");
    Runtime::new(initialize(&Config::default()), host)
}

fn book(id: i64) -> Pane {
    Pane::Book {
        book_id: BookId(id),
        note_id: None,
    }
}

fn announce(runtime: &mut Runtime<RecordingHost>, pane: Pane, title: &str) {
    runtime.dispatch(Event::PaneAnnounced {
        pane,
        title: Some(title.to_string()),
        subtitle: None,
    });
}

#[test]
fn deep_link_cold_start_shows_book_then_note() {
    let mut runtime = runtime();
    runtime.dispatch(Event::ColdStart {
        intent: Intent {
            book_id: 7,
            note_id: 42,
            ..Intent::main()
        },
    });

    assert_eq!(
        runtime.host().shown(),
        vec![
            Pane::Books,
            Pane::Book {
                book_id: BookId(7),
                note_id: Some(NoteId(42))
            },
            Pane::Note {
                book_id: BookId(7),
                note_id: NoteId(42)
            },
        ]
    );
    // Books list replaces, book and note stack on top of it.
    assert_eq!(runtime.host().back_stack_depth(), 3);
}

#[test]
fn drawer_click_switches_pane_after_the_close_delay() {
    let mut runtime = runtime();
    runtime.dispatch(Event::DrawerItemClicked {
        item: DrawerItem::Filters,
    });

    assert_eq!(runtime.host().log(), &[Action::CloseDrawer]);
    assert_eq!(runtime.scheduler().pending(), 1);

    runtime.advance(Duration::from_millis(299));
    assert!(runtime.host().shown().is_empty());

    runtime.advance(Duration::from_millis(1));
    assert_eq!(runtime.host().shown(), vec![Pane::Filters]);
}

#[test]
fn drawer_click_is_dropped_when_host_is_torn_down_first() {
    let mut runtime = runtime();
    runtime.dispatch(Event::DrawerItemClicked {
        item: DrawerItem::Book { book_id: BookId(7) },
    });
    runtime.dispatch(Event::HostDestroyed);
    runtime.advance(Duration::from_secs(1));

    assert!(runtime.host().shown().is_empty());
}

#[test]
fn drawer_click_away_from_books_closes_the_selection_surface() {
    let mut runtime = runtime();
    announce(&mut runtime, book(7), "Work");
    runtime.dispatch(Event::NoteLongClicked { note_id: NoteId(42) });
    runtime.host_mut().take_log();

    // Same book: selection survives the switch.
    runtime.dispatch(Event::DrawerItemClicked {
        item: DrawerItem::Book { book_id: BookId(7) },
    });
    assert_eq!(runtime.host_mut().take_log(), vec![Action::CloseDrawer]);
    assert_eq!(runtime.state().selection_count(), 1);

    runtime.dispatch(Event::DrawerItemClicked {
        item: DrawerItem::Filters,
    });
    assert_eq!(
        runtime.host().log().first(),
        Some(&Action::Surface {
            command: SurfaceCommand::Finish { surface: SurfaceId(1) }
        })
    );
    assert_eq!(runtime.state().selection_count(), 0);

    runtime.advance(Duration::from_millis(300));
    assert_eq!(runtime.host().shown().last(), Some(&Pane::Filters));
}

#[test]
fn back_press_closes_drawer_before_anything_else() {
    let mut runtime = runtime();
    runtime.host_mut().set_needs_confirmation(true);
    runtime.dispatch(Event::DrawerSlide { offset: 0.2 });
    runtime.host_mut().take_log();

    runtime.dispatch(Event::BackPressed);
    assert_eq!(runtime.host_mut().take_log(), vec![Action::CloseDrawer]);

    // Pane with unsaved edits handles back on its own.
    runtime.dispatch(Event::BackPressed);
    assert!(runtime.host().log().is_empty());

    runtime.host_mut().set_needs_confirmation(false);
    runtime.dispatch(Event::BackPressed);
    assert_eq!(runtime.host().log(), &[Action::NavigateBack]);
}

#[test]
fn drawer_covers_and_restores_the_title() {
    let mut runtime = runtime();
    announce(&mut runtime, book(7), "Work");

    for offset in [0.3, 0.3, 0.6] {
        runtime.dispatch(Event::DrawerSlide { offset });
    }
    announce(&mut runtime, Pane::Filters, "Searches");
    runtime.dispatch(Event::DrawerSlide { offset: 0.0 });

    let titles: Vec<TitleText> = runtime
        .host()
        .log()
        .iter()
        .filter_map(|a| match a {
            Action::SetTitle { text } => Some(text.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        titles,
        vec![
            TitleText::new("Work", None),
            TitleText::new("Notes", None),
            TitleText::new("Searches", None),
        ]
    );

    let menu: Vec<bool> = runtime
        .host()
        .log()
        .iter()
        .filter_map(|a| match a {
            Action::InvalidateOptionsMenu { visible } => Some(*visible),
            _ => None,
        })
        .collect();
    assert_eq!(menu, vec![false, true]);
}

#[test]
fn selection_drives_a_single_action_surface() {
    let mut runtime = runtime();
    announce(&mut runtime, book(7), "Work");
    runtime.host_mut().take_log();

    for id in [1, 2, 1, 2] {
        runtime.dispatch(Event::ItemToggled {
            item_id: ItemId(id),
            descriptor: None,
        });
    }

    let surface_commands: Vec<SurfaceCommand> = runtime
        .host()
        .log()
        .iter()
        .filter_map(|a| match a {
            Action::Surface { command } => Some(command.clone()),
            _ => None,
        })
        .collect();

    assert!(matches!(surface_commands[0], SurfaceCommand::Start { surface: SurfaceId(1), .. }));
    assert_eq!(
        &surface_commands[1..],
        &[
            SurfaceCommand::Invalidate { surface: SurfaceId(1), count: 2 },
            SurfaceCommand::Invalidate { surface: SurfaceId(1), count: 1 },
            SurfaceCommand::Finish { surface: SurfaceId(1) },
        ]
    );
    assert_eq!(runtime.state().selection_count(), 0);
}

#[test]
fn move_mode_resyncs_outline_when_surface_closes() {
    let mut runtime = runtime();
    announce(&mut runtime, book(7), "Work");

    runtime.dispatch(Event::ItemToggled {
        item_id: ItemId(42),
        descriptor: Some(ActionDescriptor::structural_move()),
    });
    runtime.dispatch(Event::ShelfRequest {
        command: ShelfCommand::move_note(BookId(7), NoteId(42), -1),
    });
    runtime.host_mut().take_log();

    // User dismisses the surface from the host side.
    runtime.dispatch(Event::ActionSurfaceClosed { surface: SurfaceId(1) });

    let log = runtime.host().log();
    assert!(log.contains(&Action::PostToShelf(ShelfCommand::sync_on_note_update())));
    assert!(log.contains(&Action::ApplyPaneChrome {
        kind: panenav::PaneKind::Book,
        selection_count: 0
    }));
    assert!(!runtime.state().structural_move_requested);
}

#[test]
fn book_click_reenters_as_broadcast() {
    let mut runtime = runtime();
    runtime.dispatch(Event::BookClicked { book_id: BookId(7) });
    assert_eq!(runtime.host().shown(), vec![book(7)]);
}

#[test]
fn scroll_to_note_expands_the_tree_first() {
    let mut runtime = runtime();
    runtime.dispatch(Event::NoteScrollRequested { note_id: NoteId(42) });

    assert_eq!(
        runtime.host().log(),
        &[
            Action::PostToShelf(ShelfCommand::sparse_tree(BookId(7), NoteId(42))),
            Action::Show {
                pane: Pane::Book {
                    book_id: BookId(7),
                    note_id: Some(NoteId(42))
                },
                add_to_backstack: true
            },
        ]
    );

    runtime.host_mut().take_log();
    runtime.dispatch(Event::NoteScrollRequested { note_id: NoteId(404) });
    assert!(runtime.host().log().is_empty());
}

#[test]
fn search_prefill_uses_the_visible_pane() {
    let mut runtime = runtime();
    runtime.dispatch(Event::Navigate {
        request: panenav::app::router::Request::OpenQuery {
            query: "t.work".to_string(),
        },
    });
    runtime.dispatch(Event::SearchOpened);
    assert!(runtime.host().log().contains(&Action::SetSearchQuery {
        query: "t.work ".to_string()
    }));

    runtime.dispatch(Event::SearchSubmitted {
        query: "t.work s.today".to_string(),
    });
    assert_eq!(
        runtime.host().shown().last(),
        Some(&Pane::Query {
            query: "t.work s.today".to_string()
        })
    );
}

#[test]
fn deleting_the_visible_book_returns_to_books_list() {
    let mut runtime = runtime();
    announce(&mut runtime, book(7), "Work");
    runtime.host_mut().take_log();

    runtime.dispatch(Event::ShelfResponse {
        response: ShelfResponse::BookDeleted { book_id: BookId(7) },
    });

    assert_eq!(
        runtime.host().log(),
        &[
            Action::Notify {
                message: "Notebook deleted".to_string()
            },
            Action::ClearPanes,
            Action::Show {
                pane: Pane::Books,
                add_to_backstack: false
            },
        ]
    );
}

#[test]
fn resume_prompts_pending_import_and_syncs() {
    let mut runtime = runtime();
    runtime.dispatch(Event::FileChosen {
        uri: "file:///sdcard/Download/groceries.org".to_string(),
    });
    runtime.dispatch(Event::Resumed { first_run: true });

    let log = runtime.host().log();
    let Some(Action::PromptImport { import }) = log.first() else {
        panic!("expected import prompt first, got {log:?}");
    };
    assert_eq!(import.suggested_name.as_deref(), Some("groceries"));
    assert_eq!(log[1], Action::PostToShelf(ShelfCommand::sync_on_resume()));
    assert_eq!(log[2], Action::OpenDrawer);
    assert!(runtime.state().drawer.is_open());
}

#[test]
fn rejected_shelf_commands_do_not_stop_the_queue() {
    let mut runtime = runtime();
    runtime.host_mut().set_reject_shelf(true);
    runtime.dispatch(Event::NoteScrollRequested { note_id: NoteId(42) });

    // The sparse tree command failed, the show still happened.
    assert_eq!(runtime.host().shown().len(), 1);
}

#[test]
fn failed_commands_become_notifications() {
    let mut runtime = runtime();
    runtime.dispatch(Event::ShelfResponse {
        response: ShelfResponse::Failed {
            command: "export_book".to_string(),
            message: "Storage not writable".to_string(),
        },
    });
    assert_eq!(
        runtime.host().log(),
        &[Action::Notify {
            message: "Storage not writable".to_string()
        }]
    );
}
