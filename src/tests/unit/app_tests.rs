//! App shell: tab switching, modal keys, quitting and notifications.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

use crate::core::columns::NumericColumn;
use crate::tests::mocks::{Harness, MockApi};
use crate::tui::app::AppState;
use crate::tui::events::{AppEvent, Focus, NotificationLevel};

fn app() -> (AppState, TempDir) {
    let Harness {
        services,
        events,
        dir,
    } = Harness::new(MockApi::new());
    (AppState::new(events, services), dir)
}

fn send(app: &mut AppState, code: KeyCode) {
    app.handle_event(AppEvent::Input(Event::Key(KeyEvent::new(
        code,
        KeyModifiers::NONE,
    ))));
}

#[test]
fn test_starts_on_scatter() {
    let (app, _dir) = app();
    assert!(app.running);
    assert_eq!(app.focus, Focus::Scatter);
    assert!(!app.show_help);
}

#[test]
fn test_tab_and_number_keys_switch_views() {
    let (mut app, _dir) = app();
    send(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, Focus::Predict);
    send(&mut app, KeyCode::BackTab);
    assert_eq!(app.focus, Focus::Scatter);
    send(&mut app, KeyCode::Char('2'));
    assert_eq!(app.focus, Focus::Predict);
    send(&mut app, KeyCode::Char('1'));
    assert_eq!(app.focus, Focus::Scatter);
}

#[test]
fn test_switching_views_preserves_form_state() {
    let (mut app, _dir) = app();
    send(&mut app, KeyCode::Char('l'));
    assert_eq!(app.scatter.selection().x, Some(NumericColumn::Time));

    send(&mut app, KeyCode::Tab);
    send(&mut app, KeyCode::Char('j'));
    send(&mut app, KeyCode::Tab);

    assert_eq!(app.focus, Focus::Scatter);
    assert_eq!(app.scatter.selection().x, Some(NumericColumn::Time));
    assert_ne!(
        app.predict.selected_row(),
        crate::tui::views::predict::PredictRow::ALL[0]
    );
}

#[test]
fn test_help_modal_captures_input() {
    let (mut app, _dir) = app();
    send(&mut app, KeyCode::Char('?'));
    assert!(app.show_help);

    send(&mut app, KeyCode::Char('q'));
    assert!(app.running);
    send(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, Focus::Scatter);

    send(&mut app, KeyCode::Esc);
    assert!(!app.show_help);
}

#[test]
fn test_q_quits_outside_edit_mode() {
    let (mut app, _dir) = app();
    send(&mut app, KeyCode::Char('q'));
    assert!(!app.running);
}

#[test]
fn test_q_is_ignored_while_editing() {
    let (mut app, _dir) = app();
    send(&mut app, KeyCode::Char('2'));
    send(&mut app, KeyCode::Enter);
    assert!(app.predict.is_editing());

    send(&mut app, KeyCode::Char('q'));
    assert!(app.running);

    app.handle_event(AppEvent::Input(Event::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    ))));
    assert!(!app.running);
}

#[test]
fn test_notifications_dedup_and_cap() {
    let (mut app, _dir) = app();
    app.push_notification("one".into(), NotificationLevel::Info);
    app.push_notification("one".into(), NotificationLevel::Info);
    assert_eq!(app.notifications.len(), 1);

    for msg in ["two", "three", "four"] {
        app.push_notification(msg.into(), NotificationLevel::Warning);
    }
    let messages: Vec<&str> = app.notifications.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(messages, ["two", "three", "four"]);
    assert!(app.notifications.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn test_notifications_expire_on_tick() {
    let (mut app, _dir) = app();
    app.push_notification("short".into(), NotificationLevel::Success);
    app.notifications[0].ttl_ticks = 2;
    app.on_tick();
    assert_eq!(app.notifications.len(), 1);
    app.on_tick();
    assert!(app.notifications.is_empty());
}

#[test]
fn test_view_notifications_reach_overlay() {
    let (mut app, _dir) = app();
    // 'o' with nothing mounted queues an info notification via services.
    send(&mut app, KeyCode::Char('o'));
    assert!(app.notifications.is_empty());
    app.drain_events();
    assert_eq!(app.notifications.len(), 1);
    assert_eq!(app.notifications[0].level, NotificationLevel::Info);
}
