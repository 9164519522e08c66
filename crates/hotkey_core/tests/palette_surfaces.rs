use hotkey_core::{
    CommandPalette, EmptyState, ManualClock, MoveDirection, PaletteConfig, PaletteKey,
    PaletteSignal, SelectionBus, SqliteTodoStore, StatusFilter, Todo, TodoId, TodoListSurface,
    TodoStatus, TodoStore,
};
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

struct Desk {
    store: Rc<SqliteTodoStore>,
    clock: Rc<ManualClock>,
    bus: Rc<SelectionBus>,
}

impl Desk {
    fn empty() -> Self {
        Self {
            store: Rc::new(SqliteTodoStore::open_in_memory().unwrap()),
            clock: Rc::new(ManualClock::new()),
            bus: Rc::new(SelectionBus::new()),
        }
    }

    fn palette(&self) -> CommandPalette<SqliteTodoStore> {
        CommandPalette::new(
            Rc::clone(&self.store),
            self.clock.clone(),
            PaletteConfig::default(),
            Rc::clone(&self.bus),
        )
    }

    fn list(&self) -> Rc<RefCell<TodoListSurface<SqliteTodoStore>>> {
        Rc::new(RefCell::new(TodoListSurface::new(
            Rc::clone(&self.store),
            self.clock.clone(),
            PaletteConfig::default(),
        )))
    }

    fn insert(&self, title: &str, status: TodoStatus, created_at: i64) -> TodoId {
        let mut todo = Todo::with_id(Uuid::new_v4(), title, created_at);
        todo.status = status;
        self.store.create(&todo).unwrap()
    }
}

/// Draft (pending, newest), Collect (pending), Polish (completed, oldest).
struct Sample {
    desk: Desk,
    draft: TodoId,
    collect: TodoId,
    polish: TodoId,
}

fn sample() -> Sample {
    let desk = Desk::empty();
    let draft = desk.insert("Draft architecture notes", TodoStatus::Pending, 3_000);
    let collect = desk.insert("Collect shortcut feedback", TodoStatus::Pending, 2_000);
    let polish = desk.insert("Polish release notes", TodoStatus::Completed, 1_000);
    Sample {
        desk,
        draft,
        collect,
        polish,
    }
}

fn titles(results: &[hotkey_core::SearchResult]) -> Vec<&str> {
    results.iter().map(|result| result.title.as_str()).collect()
}

#[test]
fn notes_query_lists_matches_newest_first_and_narrows_with_open_filter() {
    let sample = sample();
    let mut palette = sample.desk.palette();

    palette.set_search_text("notes");
    sample.desk.clock.advance(PaletteConfig::default().debounce());
    assert!(palette.tick());
    assert_eq!(
        titles(palette.results()),
        vec!["Draft architecture notes", "Polish release notes"]
    );

    palette.set_status_filter(StatusFilter::Open);
    sample.desk.clock.advance(PaletteConfig::default().debounce());
    assert!(palette.tick());
    assert_eq!(titles(palette.results()), vec!["Draft architecture notes"]);
    assert_eq!(palette.highlighted(), Some(sample.draft));
}

#[test]
fn title_segments_mark_the_query_inside_results() {
    let sample = sample();
    let mut palette = sample.desk.palette();
    palette.set_search_text("NOTES");
    sample.desk.clock.advance(PaletteConfig::default().debounce());
    palette.tick();

    let draft = &palette.results()[0];
    let segments = palette
        .title_segments(draft)
        .into_iter()
        .map(|segment| (segment.text, segment.is_match))
        .collect::<Vec<_>>();
    assert_eq!(
        segments,
        vec![("Draft architecture ", false), ("notes", true)]
    );
    assert!(palette.content_segments(draft).is_none());
}

#[test]
fn confirm_publishes_to_list_which_selects_and_requests_focus() {
    let sample = sample();
    let list = sample.desk.list();
    let subscription = TodoListSurface::attach(&list, &sample.desk.bus);
    let mut palette = sample.desk.palette();

    assert_eq!(list.borrow().selected(), Some(sample.draft));
    palette.handle_key(PaletteKey::Down);
    palette.handle_key(PaletteKey::Down);
    assert_eq!(palette.highlighted(), Some(sample.polish));

    assert_eq!(palette.handle_key(PaletteKey::Enter), PaletteSignal::Dismiss);
    assert_eq!(list.borrow().selected(), Some(sample.polish));
    assert_eq!(list.borrow_mut().take_focus_request(), Some(sample.polish));
    assert_eq!(list.borrow_mut().take_focus_request(), None);

    assert!(sample.desk.bus.unsubscribe(subscription));
}

#[test]
fn list_ignores_requests_for_todos_it_does_not_show() {
    let sample = sample();
    let list = sample.desk.list();
    list.borrow_mut().set_status_filter(StatusFilter::Done);
    sample.desk.clock.advance(PaletteConfig::default().debounce());
    list.borrow_mut().tick();
    assert_eq!(list.borrow().selected(), Some(sample.polish));
    TodoListSurface::attach(&list, &sample.desk.bus);

    let mut palette = sample.desk.palette();
    assert_eq!(palette.click(sample.collect), PaletteSignal::Dismiss);

    let list = list.borrow();
    assert_eq!(list.selected(), Some(sample.polish));
    assert_eq!(list.session().engine().status_filter(), StatusFilter::Done);
    assert_eq!(titles(list.results()), vec!["Polish release notes"]);
}

#[test]
fn bus_reaches_every_subscribed_surface() {
    let sample = sample();
    let first = sample.desk.list();
    let second = sample.desk.list();
    TodoListSurface::attach(&first, &sample.desk.bus);
    let second_subscription = TodoListSurface::attach(&second, &sample.desk.bus);

    sample.desk.bus.publish(sample.collect);
    assert_eq!(first.borrow().selected(), Some(sample.collect));
    assert_eq!(second.borrow().selected(), Some(sample.collect));

    sample.desk.bus.unsubscribe(second_subscription);
    sample.desk.bus.publish(sample.polish);
    assert_eq!(first.borrow().selected(), Some(sample.polish));
    assert_eq!(second.borrow().selected(), Some(sample.collect));
}

#[test]
fn dropped_surface_is_skipped_by_the_bus() {
    let sample = sample();
    let list = sample.desk.list();
    TodoListSurface::attach(&list, &sample.desk.bus);
    drop(list);

    sample.desk.bus.publish(sample.draft);
    assert_eq!(sample.desk.bus.subscriber_count(), 1);
}

#[test]
fn list_selection_survives_unrelated_churn_and_repairs_on_removal() {
    let sample = sample();
    let list = sample.desk.list();
    list.borrow_mut().select(sample.collect);

    let newer = sample.desk.insert("Newest item", TodoStatus::Pending, 9_000);
    sample
        .desk
        .store
        .update(&{
            let mut polish = sample.desk.store.get(sample.polish).unwrap().unwrap();
            polish.title = "Polish release notes v2".to_string();
            polish
        })
        .unwrap();
    assert!(list.borrow_mut().tick());
    assert_eq!(list.borrow().results()[0].id, newer);
    assert_eq!(list.borrow().selected(), Some(sample.collect));

    sample.desk.store.delete(sample.collect).unwrap();
    assert!(list.borrow_mut().tick());
    assert_eq!(list.borrow().selected(), Some(newer));
}

#[test]
fn palette_refreshes_after_list_quick_capture() {
    let sample = sample();
    let list = sample.desk.list();
    let mut palette = sample.desk.palette();
    palette.set_search_text("groceries");
    sample.desk.clock.advance(PaletteConfig::default().debounce());
    palette.tick();
    assert!(palette.results().is_empty());
    assert_eq!(palette.empty_state(), EmptyState::NoMatches);

    let created = {
        let mut list = list.borrow_mut();
        list.quick_capture_title = "  Buy groceries  ".to_string();
        list.quick_capture_content = "milk, eggs".to_string();
        list.submit_quick_capture()
    }
    .expect("title is not blank");

    {
        let list = list.borrow();
        assert_eq!(list.selected(), Some(created));
        assert!(list.quick_capture_title.is_empty());
        assert!(list.quick_capture_content.is_empty());
    }

    assert!(palette.tick());
    assert_eq!(titles(palette.results()), vec!["Buy groceries"]);
    assert_eq!(palette.highlighted(), Some(created));
    assert_eq!(palette.empty_state(), EmptyState::Results);
}

#[test]
fn blank_quick_capture_is_ignored() {
    let desk = Desk::empty();
    let list = desk.list();
    let mut list = list.borrow_mut();
    list.quick_capture_title = "   ".to_string();
    list.quick_capture_content = "keep me".to_string();

    assert_eq!(list.submit_quick_capture(), None);
    assert_eq!(list.quick_capture_content, "keep me");
    assert!(list.results().is_empty());
}

#[test]
fn toggling_under_open_filter_drops_row_and_repairs_selection() {
    let sample = sample();
    let list = sample.desk.list();
    let mut list = list.borrow_mut();
    list.set_status_filter(StatusFilter::Open);
    sample.desk.clock.advance(PaletteConfig::default().debounce());
    list.tick();
    assert_eq!(list.selected(), Some(sample.draft));

    assert_eq!(list.toggle_selected(), Some(TodoStatus::Completed));
    assert_eq!(titles(list.results()), vec!["Collect shortcut feedback"]);
    assert_eq!(list.selected(), Some(sample.collect));

    assert_eq!(list.toggle_completion(sample.draft), Some(TodoStatus::Pending));
    assert_eq!(list.results().len(), 2);
    assert_eq!(list.selected(), Some(sample.collect));
}

#[test]
fn list_edits_of_missing_todos_are_silent() {
    let sample = sample();
    let list = sample.desk.list();
    let mut list = list.borrow_mut();
    let ghost = Uuid::new_v4();

    list.rename(ghost, "Ghost");
    list.edit_content(ghost, Some("boo"));
    assert_eq!(list.toggle_completion(ghost), None);
    list.delete(ghost);
    assert_eq!(list.results().len(), 3);

    list.rename(sample.collect, "Collect hotkey feedback");
    list.edit_content(sample.collect, Some("  ask design  "));
    let renamed = sample.desk.store.get(sample.collect).unwrap().unwrap();
    assert_eq!(renamed.title, "Collect hotkey feedback");
    assert_eq!(renamed.content.as_deref(), Some("ask design"));
    assert_eq!(list.results()[1].title, "Collect hotkey feedback");
}

#[test]
fn deleting_selected_row_moves_selection_to_first() {
    let sample = sample();
    let list = sample.desk.list();
    let mut list = list.borrow_mut();
    list.move_selection(MoveDirection::Down);
    assert_eq!(list.selected(), Some(sample.collect));

    list.delete_selected();
    assert_eq!(titles(list.results()), vec![
        "Draft architecture notes",
        "Polish release notes"
    ]);
    assert_eq!(list.selected(), Some(sample.draft));
    assert!(sample.desk.store.get(sample.collect).unwrap().is_none());
}

#[test]
fn palette_keys_clamp_and_escape_does_not_publish() {
    let sample = sample();
    let list = sample.desk.list();
    list.borrow_mut().select(sample.collect);
    TodoListSurface::attach(&list, &sample.desk.bus);
    let mut palette = sample.desk.palette();

    for _ in 0..5 {
        assert_eq!(palette.handle_key(PaletteKey::Down), PaletteSignal::Stay);
    }
    assert_eq!(palette.highlighted(), Some(sample.polish));
    for _ in 0..5 {
        palette.handle_key(PaletteKey::Up);
    }
    assert_eq!(palette.highlighted(), Some(sample.draft));

    palette.hover(sample.polish);
    assert_eq!(palette.highlighted(), Some(sample.polish));
    assert_eq!(palette.handle_key(PaletteKey::Escape), PaletteSignal::Dismiss);
    assert_eq!(list.borrow().selected(), Some(sample.collect));
}

#[test]
fn empty_palette_reports_no_todos_and_enter_stays_open() {
    let desk = Desk::empty();
    let mut palette = desk.palette();

    assert_eq!(palette.empty_state(), EmptyState::NoTodos);
    assert_eq!(palette.highlighted(), None);
    assert_eq!(
        palette.footer_hint(),
        "Use the arrow keys to highlight a todo"
    );
    assert_eq!(palette.handle_key(PaletteKey::Enter), PaletteSignal::Stay);
    assert_eq!(palette.handle_key(PaletteKey::Down), PaletteSignal::Stay);
    assert_eq!(palette.highlighted(), None);

    let id = desk.insert("First todo", TodoStatus::Pending, 1);
    assert!(palette.tick());
    assert_eq!(palette.highlighted(), Some(id));
    assert_eq!(palette.footer_hint(), "Press \u{21B5} to open details");
}

#[test]
fn clear_query_goes_through_the_debounce() {
    let sample = sample();
    let mut palette = sample.desk.palette();
    palette.set_search_text("polish");
    sample.desk.clock.advance(PaletteConfig::default().debounce());
    palette.tick();
    assert_eq!(palette.results().len(), 1);

    palette.clear_query();
    assert_eq!(palette.search_text(), "");
    assert!(!palette.tick());
    assert_eq!(palette.results().len(), 1);

    sample.desk.clock.advance(PaletteConfig::default().debounce());
    assert!(palette.tick());
    assert_eq!(palette.results().len(), 3);
    assert_eq!(palette.highlighted(), Some(sample.polish));
}
