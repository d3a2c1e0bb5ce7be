//! KNN prediction view: form editing, submission and settlement.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::core::error::ApiError;
use crate::core::metrics::tiles;
use crate::core::params::{CatalystType, NumericField};
use crate::core::request::StalePolicy;
use crate::tests::mocks::{sample_prediction, Harness, MockApi};
use crate::tui::views::predict::{PredictRow, PredictViewState};

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn press(view: &mut PredictViewState, h: &Harness, codes: &[KeyCode]) {
    for code in codes {
        view.handle_input(&key(*code), &h.services);
    }
}

fn select(view: &mut PredictViewState, h: &Harness, row: PredictRow) {
    while view.selected_row() != row {
        assert!(view.handle_input(&key(KeyCode::Down), &h.services));
    }
}

#[tokio::test]
async fn test_submit_default_record_settles_metrics() {
    let mut api = MockApi::new();
    api.expect_predict()
        .withf(|p| p.time == 29.0 && p.catalyst_type == CatalystType::MarbleDust)
        .times(1)
        .returning(|_| Ok(sample_prediction()));
    let h = Harness::new(api);
    let mut view = PredictViewState::new(StalePolicy::LastResolved);

    press(&mut view, &h, &[KeyCode::Char('s')]);
    assert!(view.is_loading());
    assert!(view.settled().await);

    let result = view.result().expect("result");
    assert_eq!(result.message, "Prediction completed");
    let tiles = tiles(result);
    assert_eq!(tiles[0].label, "H₂ %");
    assert_eq!(tiles[0].value, "12.346");
    assert!(view.error().is_none());
    assert!(!view.is_loading());
}

#[tokio::test]
async fn test_http_500_shows_status_and_no_result() {
    let mut api = MockApi::new();
    api.expect_predict()
        .times(1)
        .returning(|_| Err(ApiError::Status { status: 500 }));
    let h = Harness::new(api);
    let mut view = PredictViewState::new(StalePolicy::LastResolved);

    view.submit(&h.services);
    view.settled().await;

    assert!(view.result().is_none());
    assert_eq!(view.error(), Some("HTTP 500"));
    assert!(!view.is_loading());
}

#[tokio::test]
async fn test_unparseable_number_blocks_request() {
    let mut api = MockApi::new();
    api.expect_predict().times(0);
    let h = Harness::new(api);
    let mut view = PredictViewState::new(StalePolicy::LastResolved);

    select(&mut view, &h, PredictRow::Number(NumericField::TIn));
    press(
        &mut view,
        &h,
        &[
            KeyCode::Enter,
            KeyCode::Backspace,
            KeyCode::Backspace,
            KeyCode::Backspace,
            KeyCode::Enter,
        ],
    );
    assert!(view.params().t_in.is_nan());

    press(&mut view, &h, &[KeyCode::Char('s')]);
    assert_eq!(view.error(), Some("t_in must be a number"));
    assert!(!view.is_loading());
}

fn type_rate(view: &mut PredictViewState, h: &Harness, raw: &str) {
    select(view, h, PredictRow::Number(NumericField::CatalystRate));
    press(view, h, &[KeyCode::Enter, KeyCode::Backspace, KeyCode::Backspace]);
    for c in raw.chars() {
        press(view, h, &[KeyCode::Char(c)]);
    }
    press(view, h, &[KeyCode::Enter]);
}

#[tokio::test]
async fn test_negative_rate_blocks_request() {
    let mut api = MockApi::new();
    api.expect_predict().times(0);
    let h = Harness::new(api);
    let mut view = PredictViewState::new(StalePolicy::LastResolved);

    type_rate(&mut view, &h, "-3");
    assert_eq!(view.params().catalyst_rate, -3.0);

    press(&mut view, &h, &[KeyCode::Char('s')]);
    assert_eq!(
        view.error(),
        Some("catalyst_rate must be a whole number of at least 0")
    );
    assert!(!view.is_loading());
}

#[tokio::test]
async fn test_fractional_rate_blocks_request() {
    let mut api = MockApi::new();
    api.expect_predict().times(0);
    let h = Harness::new(api);
    let mut view = PredictViewState::new(StalePolicy::LastResolved);

    type_rate(&mut view, &h, "2.5");
    assert_eq!(view.params().catalyst_rate, 2.5);

    view.submit(&h.services);
    assert_eq!(
        view.error(),
        Some("catalyst_rate must be a whole number of at least 0")
    );
    assert!(view.result().is_none());
}

#[test]
fn test_stepping_locked_rate_notifies() {
    let mut h = Harness::new(MockApi::new());
    let mut view = PredictViewState::new(StalePolicy::LastResolved);

    select(&mut view, &h, PredictRow::Catalyst);
    press(&mut view, &h, &[KeyCode::Char('l')]);
    assert_eq!(view.params().catalyst_type, CatalystType::None);
    h.notifications();

    select(&mut view, &h, PredictRow::Number(NumericField::CatalystRate));
    press(&mut view, &h, &[KeyCode::Char('l')]);
    assert_eq!(view.params().catalyst_rate, 0.0);
    let notes = h.notifications();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].message.contains("locked"));
}

#[test]
fn test_edit_commits_typed_value() {
    let h = Harness::new(MockApi::new());
    let mut view = PredictViewState::new(StalePolicy::LastResolved);

    press(
        &mut view,
        &h,
        &[
            KeyCode::Char('i'),
            KeyCode::Backspace,
            KeyCode::Backspace,
            KeyCode::Char('3'),
            KeyCode::Char('1'),
        ],
    );
    assert!(view.is_editing());
    assert_eq!(view.params().time, 29.0);

    press(&mut view, &h, &[KeyCode::Enter]);
    assert!(!view.is_editing());
    assert_eq!(view.params().time, 31.0);
}

#[test]
fn test_escape_discards_edit() {
    let h = Harness::new(MockApi::new());
    let mut view = PredictViewState::new(StalePolicy::LastResolved);

    press(&mut view, &h, &[KeyCode::Enter, KeyCode::Char('5'), KeyCode::Esc]);
    assert!(!view.is_editing());
    assert_eq!(view.params().time, 29.0);
}

#[test]
fn test_editing_swallows_global_keys() {
    let h = Harness::new(MockApi::new());
    let mut view = PredictViewState::new(StalePolicy::LastResolved);

    assert!(!view.handle_input(&key(KeyCode::Char('q')), &h.services));
    press(&mut view, &h, &[KeyCode::Enter]);
    assert!(view.handle_input(&key(KeyCode::Char('q')), &h.services));
    assert!(view.handle_input(&key(KeyCode::Tab), &h.services));
    assert!(view.is_editing());
}

#[test]
fn test_no_catalyst_zeroes_and_locks_rate() {
    let mut h = Harness::new(MockApi::new());
    let mut view = PredictViewState::new(StalePolicy::LastResolved);

    select(&mut view, &h, PredictRow::Catalyst);
    // Marble dust -> None
    press(&mut view, &h, &[KeyCode::Char('l')]);
    assert_eq!(view.params().catalyst_type, CatalystType::None);
    assert_eq!(view.params().catalyst_rate, 0.0);

    select(&mut view, &h, PredictRow::Number(NumericField::CatalystRate));
    press(&mut view, &h, &[KeyCode::Enter, KeyCode::Char('l')]);
    assert!(!view.is_editing());
    assert_eq!(view.params().catalyst_rate, 0.0);
    assert!(h
        .notifications()
        .iter()
        .any(|n| n.message.contains("locked")));
}

#[test]
fn test_changing_catalyst_keeps_rate() {
    let h = Harness::new(MockApi::new());
    let mut view = PredictViewState::new(StalePolicy::LastResolved);

    select(&mut view, &h, PredictRow::Catalyst);
    // Marble dust -> Al-Ni
    press(&mut view, &h, &[KeyCode::Char('h')]);
    assert_eq!(view.params().catalyst_type, CatalystType::AlNi);
    assert_eq!(view.params().catalyst_rate, 10.0);
}

#[test]
fn test_step_keys_use_field_increment() {
    let h = Harness::new(MockApi::new());
    let mut view = PredictViewState::new(StalePolicy::LastResolved);

    select(&mut view, &h, PredictRow::Number(NumericField::QAgent));
    press(&mut view, &h, &[KeyCode::Right, KeyCode::Right]);
    assert_eq!(view.params().q_agent, 0.0152);

    select(&mut view, &h, PredictRow::Number(NumericField::CatalystRate));
    for _ in 0..15 {
        press(&mut view, &h, &[KeyCode::Left]);
    }
    assert_eq!(view.params().catalyst_rate, 0.0);
}

#[test]
fn test_cursor_stops_at_form_edges() {
    let h = Harness::new(MockApi::new());
    let mut view = PredictViewState::new(StalePolicy::LastResolved);

    press(&mut view, &h, &[KeyCode::Up]);
    assert_eq!(view.selected_row(), PredictRow::Number(NumericField::Time));
    for _ in 0..20 {
        press(&mut view, &h, &[KeyCode::Down]);
    }
    assert_eq!(view.selected_row(), PredictRow::Submit);
}
