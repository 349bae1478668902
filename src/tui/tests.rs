// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{
    draw, osc52_sequence, parse_value_buffer, stack_main_panes_vertically, styled_preview_text,
    App, TuiOptions,
};
use crate::build::{form_from_inputs, HaltReason};
use crate::model::{FlowValue, FormState, GraphRef, PairKey};
use crate::render::render_sankey_unicode_annotated;
use crate::tui::theme::TuiTheme;
use crate::ui::{FormField, UiState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, layout::Rect, Terminal};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

fn app_with_form(form: FormState) -> App {
    App::new(form, TuiTheme::default(), TuiOptions::default())
}

fn app(steps: &str) -> App {
    app_with_form(FormState::new(steps))
}

fn type_str(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_key_code(KeyCode::Char(ch));
    }
}

fn ctrl(app: &mut App, ch: char) {
    app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
}

fn value(app: &App, idx: usize) -> f64 {
    app.form.value(PairKey::new(idx)).get()
}

fn render_to_string(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
    terminal.draw(|frame| draw(frame, app)).expect("draw");
    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(usize::from(width))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn typing_steps_walks_through_halt_states() {
    let mut app = app("");
    assert_eq!(app.outcome.halt_reason(), Some(HaltReason::EmptyInput));

    type_str(&mut app, "Raw");
    assert_eq!(app.outcome.halt_reason(), Some(HaltReason::InsufficientSteps));

    type_str(&mut app, ", Done");
    assert_eq!(app.outcome.halt_reason(), Some(HaltReason::AllZeroValues));

    app.handle_key_code(KeyCode::Tab);
    assert_eq!(app.focus, FormField::Value(PairKey::new(0)));
    type_str(&mut app, "5");

    let graph = app.outcome.graph().expect("graph");
    assert_eq!(graph.links().value(), &[FlowValue::new(5.0).expect("value")]);
    assert!(matches!(app.render, Some(Ok(_))));
}

#[test]
fn value_fields_accept_only_non_negative_numbers() {
    let mut app = app("A, B");
    app.handle_key_code(KeyCode::Tab);

    type_str(&mut app, "a");
    assert_eq!(app.value_text(PairKey::new(0)), "0");
    assert!(app.toast.is_some());

    type_str(&mut app, "1.5");
    assert_eq!(value(&app, 0), 1.5);

    type_str(&mut app, ".");
    assert_eq!(app.value_text(PairKey::new(0)), "1.5");

    app.handle_key_code(KeyCode::Backspace);
    app.handle_key_code(KeyCode::Backspace);
    assert_eq!(app.value_text(PairKey::new(0)), "1");
    assert_eq!(value(&app, 0), 1.0);

    ctrl(&mut app, 'u');
    assert_eq!(app.value_text(PairKey::new(0)), "");
    assert_eq!(app.outcome.halt_reason(), Some(HaltReason::AllZeroValues));
}

#[test]
fn plus_and_minus_step_values_without_going_negative() {
    let mut app = app("A, B");
    app.handle_key_code(KeyCode::Tab);

    type_str(&mut app, "++");
    assert_eq!(value(&app, 0), 2.0);
    assert_eq!(app.value_text(PairKey::new(0)), "2");

    type_str(&mut app, "---");
    assert_eq!(value(&app, 0), 0.0);
    assert_eq!(app.value_text(PairKey::new(0)), "0");
}

#[test]
fn shrinking_steps_drops_values_for_removed_pairs() {
    let mut app = app_with_form(form_from_inputs("A, B, C", [3.0, 4.0]));
    assert_eq!(app.form.values().len(), 2);

    app.handle_key_code(KeyCode::Backspace);
    assert_eq!(app.form.steps_input(), "A, B, ");
    assert_eq!(app.form.pair_count(), 1);
    assert_eq!(app.form.values().keys().copied().collect::<Vec<_>>(), vec![PairKey::new(0)]);

    let graph = app.outcome.graph().expect("graph");
    assert_eq!(graph.node_count(), 2);
}

#[test]
fn focus_cycles_through_fields_and_wraps() {
    let mut app = app("A, B");
    app.handle_key_code(KeyCode::Tab);
    assert_eq!(app.focus, FormField::Value(PairKey::new(0)));
    app.handle_key_code(KeyCode::Down);
    assert_eq!(app.focus, FormField::Steps);
    app.handle_key_code(KeyCode::BackTab);
    assert_eq!(app.focus, FormField::Value(PairKey::new(0)));
    app.handle_key_code(KeyCode::Up);
    assert_eq!(app.focus, FormField::Steps);
}

#[test]
fn help_overlay_swallows_keys_until_closed() {
    let mut app = app("");
    app.handle_key_code(KeyCode::F(1));
    assert!(app.show_help);

    app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
    assert_eq!(app.form.steps_input(), "");

    app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert!(!app.show_help);
    assert!(!app.should_quit);

    app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert!(app.should_quit);
}

#[test]
fn ctrl_r_resets_the_form() {
    let mut app = app_with_form(form_from_inputs("A, B", [2.0]));
    app.handle_key_code(KeyCode::Tab);
    ctrl(&mut app, 'r');

    assert_eq!(app.form, FormState::default());
    assert_eq!(app.focus, FormField::Steps);
    assert_eq!(app.outcome.halt_reason(), Some(HaltReason::EmptyInput));
}

#[test]
fn local_edits_are_published_to_ui_state() {
    let ui_state = Arc::new(Mutex::new(UiState::new(FormState::new("A, B"))));
    let mut app = app("A, B");
    app.attach_ui_state(ui_state.clone());

    app.handle_key_code(KeyCode::Tab);
    type_str(&mut app, "7");

    let state = ui_state.blocking_lock();
    assert_eq!(state.form().value(PairKey::new(0)).get(), 7.0);
    assert_eq!(state.form_rev(), app.ui_form_rev);
    assert_eq!(state.human_focus(), Some(FormField::Value(PairKey::new(0))));
}

#[test]
fn remote_edits_are_adopted_and_focus_is_clamped() {
    let ui_state = Arc::new(Mutex::new(UiState::new(FormState::new("A, B, C"))));
    let mut app = app("A, B, C");
    app.attach_ui_state(ui_state.clone());
    app.handle_key_code(KeyCode::Tab);
    app.handle_key_code(KeyCode::Tab);
    assert_eq!(app.focus, FormField::Value(PairKey::new(1)));

    ui_state.blocking_lock().set_steps_input("A, B");
    app.sync_from_ui_state();

    assert_eq!(app.form.steps_input(), "A, B");
    assert_eq!(app.focus, FormField::Value(PairKey::new(0)));
    assert_eq!(app.outcome.halt_reason(), Some(HaltReason::AllZeroValues));
    assert_eq!(ui_state.blocking_lock().human_focus(), Some(FormField::Value(PairKey::new(0))));
    assert!(app.toast.is_some());
}

#[test]
fn attaching_adopts_the_shared_form() {
    let ui_state = Arc::new(Mutex::new(UiState::new(form_from_inputs("X, Y", [1.0]))));
    let mut app = app("");
    app.attach_ui_state(ui_state);

    assert_eq!(app.form.steps_input(), "X, Y");
    assert!(app.outcome.graph().is_some());
}

#[test]
fn value_edits_after_an_unsynced_remote_edit_keep_both() {
    let ui_state = Arc::new(Mutex::new(UiState::new(FormState::new("A, B, C"))));
    let mut app = app("A, B, C");
    app.attach_ui_state(ui_state.clone());
    app.sync_from_ui_state();

    ui_state.blocking_lock().set_value(PairKey::new(1), 9.0);
    app.handle_key_code(KeyCode::Tab);
    type_str(&mut app, "5");

    let state = ui_state.blocking_lock();
    assert_eq!(state.form().value(PairKey::new(0)).get(), 5.0);
    assert_eq!(state.form().value(PairKey::new(1)).get(), 9.0);
    assert_eq!(state.form_rev(), app.ui_form_rev);
    drop(state);

    assert_eq!(value(&app, 1), 9.0);
    assert_eq!(app.value_text(PairKey::new(1)), "9");
    let graph = app.outcome.graph().expect("graph");
    assert_eq!(graph.links().value().iter().map(|v| v.get()).collect::<Vec<_>>(), vec![5.0, 9.0]);
}

#[test]
fn steps_edits_after_an_unsynced_remote_edit_keep_remote_values() {
    let ui_state = Arc::new(Mutex::new(UiState::new(FormState::new("A, B"))));
    let mut app = app("A, B");
    app.attach_ui_state(ui_state.clone());

    ui_state.blocking_lock().set_value(PairKey::new(0), 4.0);
    type_str(&mut app, ", C");

    let state = ui_state.blocking_lock();
    assert_eq!(state.form().steps_input(), "A, B, C");
    assert_eq!(state.form().value(PairKey::new(0)).get(), 4.0);
    drop(state);
    assert_eq!(app.form.steps_input(), "A, B, C");
    assert_eq!(value(&app, 0), 4.0);
}

#[test]
fn merged_remote_values_replace_stale_typed_text() {
    let ui_state = Arc::new(Mutex::new(UiState::new(FormState::new("A, B, C"))));
    let mut app = app("A, B, C");
    app.attach_ui_state(ui_state.clone());
    app.handle_key_code(KeyCode::Tab);
    app.handle_key_code(KeyCode::Tab);
    type_str(&mut app, "3");

    ui_state.blocking_lock().set_value(PairKey::new(1), 8.0);
    app.handle_key_code(KeyCode::Up);
    type_str(&mut app, "2");

    assert_eq!(value(&app, 0), 2.0);
    assert_eq!(app.value_text(PairKey::new(0)), "2");
    assert_eq!(app.value_text(PairKey::new(1)), "8");
}

#[test]
fn ctrl_s_exports_using_the_path_extension() {
    let path = std::env::temp_dir()
        .join(format!("procflow-tui-export-{}.json", std::process::id()));
    let mut app = App::new(
        form_from_inputs("A, B", [3.0]),
        TuiTheme::default(),
        TuiOptions { export_path: path.clone() },
    );

    ctrl(&mut app, 's');

    let written = std::fs::read_to_string(&path).expect("export file");
    let _ = std::fs::remove_file(&path);
    let json: serde_json::Value = serde_json::from_str(&written).expect("json");
    assert_eq!(json["data"][0]["type"], "sankey");
    assert_eq!(json["data"][0]["link"]["value"][0], 3.0);
}

#[test]
fn exporting_a_halted_form_only_reports_why() {
    let path = std::env::temp_dir()
        .join(format!("procflow-tui-halted-{}.html", std::process::id()));
    let mut app = App::new(
        FormState::new("A"),
        TuiTheme::default(),
        TuiOptions { export_path: path.clone() },
    );

    ctrl(&mut app, 's');

    assert!(!path.exists());
    let toast = app.toast.as_ref().expect("toast");
    assert!(toast.message.contains(HaltReason::InsufficientSteps.message()));
}

#[test]
fn ctrl_y_queues_plotly_json_for_the_clipboard() {
    let mut app = app_with_form(form_from_inputs("A, B", [3.0]));
    ctrl(&mut app, 'y');
    let text = app.take_clipboard_request().expect("clipboard request");
    assert!(text.contains("\"sankey\""));
    assert!(app.take_clipboard_request().is_none());

    assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x1b\\");
}

#[test]
fn toasts_expire() {
    let mut app = app("");
    app.set_toast("hello");
    app.expire_toast(Instant::now());
    assert!(app.toast.is_some());
    app.expire_toast(Instant::now() + Duration::from_secs(3));
    assert!(app.toast.is_none());
}

#[test]
fn digits_past_the_float_range_are_rejected() {
    let mut app = app("A, B");
    app.handle_key_code(KeyCode::Tab);
    let largest = format!("1{}", "0".repeat(308));
    type_str(&mut app, &largest);
    assert!(app.toast.is_none());

    type_str(&mut app, "0");
    assert_eq!(app.value_text(PairKey::new(0)), largest);
    assert_eq!(value(&app, 0), 1e308);
    assert_eq!(
        app.toast.as_ref().map(|toast| toast.message.as_str()),
        Some("Values are non-negative numbers")
    );
    assert!(app.outcome.graph().is_some());
}

#[test]
fn partially_typed_values_read_as_zero() {
    assert_eq!(parse_value_buffer(""), 0.0);
    assert_eq!(parse_value_buffer("."), 0.0);
    assert_eq!(parse_value_buffer("2."), 2.0);
    assert_eq!(parse_value_buffer(".5"), 0.5);
}

#[test]
fn focused_link_is_highlighted_in_preview() {
    let form = form_from_inputs("A, B", [3.0]);
    let app = app_with_form(form);
    let render = render_sankey_unicode_annotated(app.outcome.graph().expect("graph"))
        .expect("render");
    let theme = TuiTheme::default();

    let highlighted = styled_preview_text(&render, Some(GraphRef::Link(0)), &theme);
    assert!(highlighted.lines.iter().flat_map(|line| line.spans.iter()).any(|span| {
        span.style == theme.highlight_style() && span.content.contains('█')
    }));

    let plain = styled_preview_text(&render, None, &theme);
    assert!(plain
        .lines
        .iter()
        .flat_map(|line| line.spans.iter())
        .all(|span| span.style != theme.highlight_style()));
}

#[test]
fn draw_shows_prompts_and_preview() {
    let mut app = app_with_form(form_from_inputs("Raw, Done", [4.0]));
    let screen = render_to_string(&mut app, 120, 24);

    assert!(screen.contains("Sankey Plot for Process Flow Generator"));
    assert!(screen.contains("By: A. Vera"));
    assert!(screen.contains("Flow values between steps"));
    assert!(screen.contains("Enter value from 'Raw' to 'Done':"));
    assert!(screen.contains('█'));
}

#[test]
fn draw_shows_halt_message() {
    let mut app = app("Only");
    let screen = render_to_string(&mut app, 120, 24);
    assert!(screen.contains("Please enter at least two steps"));
    assert!(!screen.contains("Flow values between steps"));
}

#[test]
fn narrow_terminals_stack_panes() {
    assert!(stack_main_panes_vertically(Rect::new(0, 0, 80, 24)));
    assert!(!stack_main_panes_vertically(Rect::new(0, 0, 120, 24)));
}
