// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Provides the interactive form (ratatui + crossterm): a steps field, one numeric field per
//! consecutive step pair, and a live preview of the resulting Sankey diagram. Every edit reruns
//! the build pipeline, so the preview always reflects the current inputs.

use std::{
    collections::BTreeMap,
    error::Error,
    fs, io,
    path::PathBuf,
    sync::{Arc, OnceLock},
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use regex::Regex;
use tokio::sync::Mutex;

use crate::build::{build, BuildOutcome};
use crate::format::{export_graph, export_plotly_json, parse_steps, ExportFormat};
use crate::model::{FlowValue, FormState, GraphRef, PairKey};
use crate::render::text::text_len;
use crate::render::{
    render_sankey_unicode_annotated, AnnotatedRender, SankeyRenderError, SANKEY_BAND,
    SANKEY_EMPTY_LINK,
};
use crate::ui::{FormField, UiState};

mod theme;

use theme::TuiTheme;

const APP_TITLE: &str = crate::format::plotly::PAGE_TITLE;
const APP_BYLINE: &str = "By: A. Vera";
const STEPS_PROMPT: &str = "Enter the steps in the process, separated by commas:";
const VALUES_HEADING: &str = "Flow values between steps";
const FIELD_PREFIX: &str = "> ";
const VALUE_STEP: f64 = 1.0;
const PREVIEW_SCROLL_X: u16 = 4;
const PREVIEW_SCROLL_Y: u16 = 5;

pub const DEFAULT_EXPORT_PATH: &str = "process-flow.html";

include!("chrome.rs");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuiOptions {
    /// Target of Ctrl-S. The export format follows the file extension.
    pub export_path: PathBuf,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self { export_path: PathBuf::from(DEFAULT_EXPORT_PATH) }
    }
}

/// Runs the interactive terminal UI on `form`.
///
/// When `ui_state` is given, form edits are published to it and edits made by other components
/// (the MCP server) are picked up on every tick.
pub fn run(
    form: FormState,
    ui_state: Option<Arc<Mutex<UiState>>>,
    options: TuiOptions,
) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env().unwrap_or_else(|err| {
        eprintln!("procflow: {err}; using the default palette");
        TuiTheme::default()
    });

    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(form, theme, options);
    if let Some(ui_state) = ui_state {
        app.attach_ui_state(ui_state);
    }

    while !app.should_quit {
        app.sync_from_ui_state();
        app.expire_toast(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                    if let Some(text) = app.take_clipboard_request() {
                        match copy_to_clipboard(&text) {
                            Ok(backend) => app.set_toast(format!("Yanked Plotly JSON ({backend})")),
                            Err(err) => app.set_toast(format!("Clipboard error: {err}")),
                        }
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let header_area = layout[0];
    let main_area = layout[1];
    let status_area = layout[2];

    frame.render_widget(
        Paragraph::new(Text::from(header_lines(&app.theme))).style(app.theme.base_style()),
        header_area,
    );

    let direction = if stack_main_panes_vertically(main_area) {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let panes = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_area);

    draw_form(frame, app, panes[0]);
    draw_preview(frame, app, panes[1]);

    let footer = footer_help_line(app, footer_uses_compact_mode(main_area));
    frame.render_widget(Paragraph::new(footer).style(app.theme.base_style()), status_area);

    if app.show_help {
        render_help(frame, app, main_area);
    }
}

fn draw_form(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(panel_title("Process", "form"))
        .border_style(app.theme.panel_border_style(true));
    let inner = block.inner(area);

    let (lines, cursor) = app.form_lines();
    let visible = usize::from(inner.height.max(1));
    let offset = cursor.0.saturating_sub(visible - 1);

    let paragraph = Paragraph::new(Text::from(lines))
        .style(app.theme.base_style())
        .block(block)
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);

    if inner.width > 0 && inner.height > 0 && !app.show_help {
        let max_col = usize::from(inner.width - 1);
        let x = inner.x + u16::try_from(cursor.1.min(max_col)).unwrap_or(0);
        let y = inner.y + u16::try_from(cursor.0 - offset).unwrap_or(0);
        frame.set_cursor_position((x, y));
    }
}

fn draw_preview(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(panel_title("Process Flow", "preview"))
        .border_style(app.theme.panel_border_style(false));

    let paragraph = match (&app.outcome, &app.render) {
        (BuildOutcome::Halt(reason), _) => {
            Paragraph::new(reason.message())
                .style(app.theme.halt_style(reason.severity()))
                .wrap(Wrap { trim: true })
        }
        (BuildOutcome::Graph(_), Some(Ok(render))) => {
            Paragraph::new(styled_preview_text(render, app.focused_graph_ref(), &app.theme))
                .style(app.theme.base_style())
                .scroll((app.preview_scroll.1, app.preview_scroll.0))
        }
        (BuildOutcome::Graph(_), Some(Err(err))) => Paragraph::new(err.to_string())
            .style(app.theme.halt_style(crate::build::HaltSeverity::Warning))
            .wrap(Wrap { trim: true }),
        (BuildOutcome::Graph(_), None) => Paragraph::new(""),
    };

    frame.render_widget(paragraph.block(block), area);
}

fn numeric_input_regex() -> &'static Regex {
    static NUMERIC_INPUT: OnceLock<Regex> = OnceLock::new();
    NUMERIC_INPUT.get_or_init(|| {
        Regex::new(r"^\d*\.?\d*$").unwrap_or_else(|err| unreachable!("numeric regex: {err}"))
    })
}

/// Value of a partially typed numeric field. `""`, `"."` and the like count as zero.
fn parse_value_buffer(buffer: &str) -> f64 {
    buffer.parse::<f64>().unwrap_or(0.0)
}

/// Which part of the form a local edit touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormEdit {
    Steps,
    Value(PairKey),
    Reset,
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    form: FormState,
    // Raw text of value fields the user has typed into; other fields display their value.
    value_buffers: BTreeMap<PairKey, String>,
    focus: FormField,
    outcome: BuildOutcome,
    render: Option<Result<AnnotatedRender, SankeyRenderError>>,
    preview_scroll: (u16, u16),
    show_help: bool,
    should_quit: bool,
    toast: Option<Toast>,
    pending_clipboard: Option<String>,
    ui_state: Option<Arc<Mutex<UiState>>>,
    ui_form_rev: u64,
    theme: TuiTheme,
    options: TuiOptions,
}

impl App {
    fn new(form: FormState, theme: TuiTheme, options: TuiOptions) -> Self {
        let mut app = Self {
            form,
            value_buffers: BTreeMap::new(),
            focus: FormField::Steps,
            outcome: BuildOutcome::Halt(crate::build::HaltReason::EmptyInput),
            render: None,
            preview_scroll: (0, 0),
            show_help: false,
            should_quit: false,
            toast: None,
            pending_clipboard: None,
            ui_state: None,
            ui_form_rev: 0,
            theme,
            options,
        };
        app.rebuild();
        app
    }

    /// Adopts the shared form and starts publishing local edits and focus to it.
    fn attach_ui_state(&mut self, ui_state: Arc<Mutex<UiState>>) {
        {
            let state = ui_state.blocking_lock();
            self.ui_form_rev = state.form_rev();
            if state.form() != &self.form {
                self.form = state.form().clone();
                self.value_buffers.clear();
                self.clamp_focus();
                self.rebuild();
            }
        }
        self.ui_state = Some(ui_state);
        self.publish_focus_to_ui_state();
    }

    fn sync_from_ui_state(&mut self) {
        let Some(ui_state) = self.ui_state.as_ref() else {
            return;
        };
        let snapshot = {
            let state = ui_state.blocking_lock();
            if state.form_rev() == self.ui_form_rev {
                return;
            }
            (state.form_rev(), state.form().clone())
        };

        let (form_rev, form) = snapshot;
        self.ui_form_rev = form_rev;
        if form == self.form {
            return;
        }
        self.form = form;
        self.value_buffers.clear();
        self.clamp_focus();
        self.rebuild();
        self.publish_focus_to_ui_state();
        self.set_toast("Form updated over MCP");
    }

    /// Publishes a local edit. If the shared form moved since the last sync, only the edited
    /// field is applied on top of it and the merged form is adopted locally.
    fn publish_form_to_ui_state(&mut self, edit: FormEdit) {
        let Some(ui_state) = self.ui_state.as_ref() else {
            return;
        };
        let merged = {
            let mut state = ui_state.blocking_lock();
            if state.form_rev() == self.ui_form_rev {
                self.ui_form_rev = state.set_form(self.form.clone());
                return;
            }
            match edit {
                FormEdit::Steps => {
                    state.set_steps_input(self.form.steps_input());
                }
                FormEdit::Value(key) => {
                    if key.index() < state.form().pair_count() {
                        state.set_value(key, self.form.value(key).get());
                    }
                }
                FormEdit::Reset => {
                    state.reset_form();
                }
            }
            self.ui_form_rev = state.form_rev();
            state.form().clone()
        };

        if merged == self.form {
            return;
        }
        self.form = merged;
        let form = &self.form;
        let pair_count = form.pair_count();
        self.value_buffers.retain(|key, buffer| {
            key.index() < pair_count
                && FlowValue::clamped(parse_value_buffer(buffer)) == form.value(*key)
        });
        let focus = self.focus;
        self.clamp_focus();
        if focus != self.focus {
            self.publish_focus_to_ui_state();
        }
    }

    fn publish_focus_to_ui_state(&self) {
        let Some(ui_state) = self.ui_state.as_ref() else {
            return;
        };
        ui_state.blocking_lock().set_human_focus(Some(self.focus));
    }

    fn rebuild(&mut self) {
        self.outcome = build(&self.form);
        self.render = self.outcome.graph().map(render_sankey_unicode_annotated);
    }

    fn form_changed(&mut self, edit: FormEdit) {
        self.publish_form_to_ui_state(edit);
        self.rebuild();
    }

    fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::Steps];
        fields.extend((0..self.form.pair_count()).map(|idx| FormField::Value(PairKey::new(idx))));
        fields
    }

    fn focus_offset(&mut self, delta: isize) {
        let fields = self.fields();
        let len = fields.len() as isize;
        let current = fields.iter().position(|field| *field == self.focus).unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.focus = fields[next];
        self.publish_focus_to_ui_state();
    }

    fn clamp_focus(&mut self) {
        if let FormField::Value(key) = self.focus {
            let pair_count = self.form.pair_count();
            if key.index() >= pair_count {
                self.focus = match pair_count {
                    0 => FormField::Steps,
                    _ => FormField::Value(PairKey::new(pair_count - 1)),
                };
            }
        }
    }

    fn focused_graph_ref(&self) -> Option<GraphRef> {
        match self.focus {
            FormField::Steps => None,
            FormField::Value(key) => Some(GraphRef::Link(key.index())),
        }
    }

    fn value_text(&self, key: PairKey) -> String {
        self.value_buffers.get(&key).cloned().unwrap_or_else(|| self.form.value(key).to_string())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('s') => self.export_to_file(),
                KeyCode::Char('y') => self.yank_plotly_json(),
                KeyCode::Char('u') => self.clear_focused_field(),
                KeyCode::Char('r') => self.reset_form(),
                _ => {}
            }
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        self.handle_key_code(key.code);
    }

    fn handle_key_code(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(1) => self.show_help = true,
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => self.focus_offset(1),
            KeyCode::BackTab | KeyCode::Up => self.focus_offset(-1),
            KeyCode::Left => {
                self.preview_scroll.0 = self.preview_scroll.0.saturating_sub(PREVIEW_SCROLL_X);
            }
            KeyCode::Right => {
                self.preview_scroll.0 = self.preview_scroll.0.saturating_add(PREVIEW_SCROLL_X);
            }
            KeyCode::PageUp => {
                self.preview_scroll.1 = self.preview_scroll.1.saturating_sub(PREVIEW_SCROLL_Y);
            }
            KeyCode::PageDown => {
                self.preview_scroll.1 = self.preview_scroll.1.saturating_add(PREVIEW_SCROLL_Y);
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(ch) => self.input_char(ch),
            _ => {}
        }
    }

    fn input_char(&mut self, ch: char) {
        match self.focus {
            FormField::Steps => {
                let mut raw = self.form.steps_input().to_owned();
                raw.push(ch);
                self.set_steps_input(raw);
            }
            FormField::Value(key) => match ch {
                '+' => self.step_value(key, VALUE_STEP),
                '-' => self.step_value(key, -VALUE_STEP),
                _ => {
                    let mut buffer = self.value_text(key);
                    if buffer == "0" && ch != '.' {
                        buffer.clear();
                    }
                    buffer.push(ch);
                    if !numeric_input_regex().is_match(&buffer)
                        || !parse_value_buffer(&buffer).is_finite()
                    {
                        self.set_toast("Values are non-negative numbers");
                        return;
                    }
                    self.set_value_buffer(key, buffer);
                }
            },
        }
    }

    fn backspace(&mut self) {
        match self.focus {
            FormField::Steps => {
                let mut raw = self.form.steps_input().to_owned();
                if raw.pop().is_some() {
                    self.set_steps_input(raw);
                }
            }
            FormField::Value(key) => {
                let mut buffer = self.value_text(key);
                if buffer.pop().is_some() {
                    self.set_value_buffer(key, buffer);
                }
            }
        }
    }

    fn clear_focused_field(&mut self) {
        match self.focus {
            FormField::Steps => self.set_steps_input(String::new()),
            FormField::Value(key) => self.set_value_buffer(key, String::new()),
        }
    }

    fn reset_form(&mut self) {
        self.form = FormState::default();
        self.value_buffers.clear();
        self.focus = FormField::Steps;
        self.preview_scroll = (0, 0);
        self.form_changed(FormEdit::Reset);
        self.publish_focus_to_ui_state();
        self.set_toast("Form reset");
    }

    fn set_steps_input(&mut self, raw: String) {
        if !self.form.set_steps_input(raw) {
            return;
        }
        let pair_count = self.form.pair_count();
        self.value_buffers.retain(|key, _| key.index() < pair_count);
        let focus = self.focus;
        self.clamp_focus();
        if focus != self.focus {
            self.publish_focus_to_ui_state();
        }
        self.form_changed(FormEdit::Steps);
    }

    fn set_value_buffer(&mut self, key: PairKey, buffer: String) {
        self.form.set_value(key, parse_value_buffer(&buffer));
        self.value_buffers.insert(key, buffer);
        self.form_changed(FormEdit::Value(key));
    }

    fn step_value(&mut self, key: PairKey, delta: f64) {
        let value = self.form.set_value(key, (self.form.value(key).get() + delta).max(0.0));
        self.value_buffers.insert(key, value.to_string());
        self.form_changed(FormEdit::Value(key));
    }

    /// Form panel lines and the cursor position `(line, column)` of the focused field.
    fn form_lines(&self) -> (Vec<Line<'static>>, (usize, usize)) {
        let theme = &self.theme;
        let mut lines = Vec::<Line<'static>>::new();
        let mut cursor = (0, 0);

        let mut push_field = |lines: &mut Vec<Line<'static>>, text: String, focused: bool| {
            if focused {
                cursor = (lines.len(), text_len(FIELD_PREFIX) + text_len(&text));
            }
            lines.push(Line::from(vec![
                Span::styled(FIELD_PREFIX.to_owned(), theme.prompt_style()),
                Span::styled(text, theme.field_style(focused)),
            ]));
        };

        lines.push(Line::from(Span::styled(STEPS_PROMPT.to_owned(), theme.prompt_style())));
        push_field(
            &mut lines,
            self.form.steps_input().to_owned(),
            self.focus == FormField::Steps,
        );

        let steps = parse_steps(self.form.steps_input());
        if steps.len() >= 2 {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(VALUES_HEADING.to_owned(), theme.heading_style())));
            for (idx, pair) in steps.windows(2).enumerate() {
                let key = PairKey::new(idx);
                lines.push(Line::from(Span::styled(
                    format!("Enter value from '{}' to '{}':", pair[0], pair[1]),
                    theme.prompt_style(),
                )));
                push_field(&mut lines, self.value_text(key), self.focus == FormField::Value(key));
            }
        }

        (lines, cursor)
    }

    fn export_to_file(&mut self) {
        let Some(graph) = self.outcome.graph() else {
            let message = self.outcome.halt_reason().map(|reason| reason.message()).unwrap_or("");
            self.set_toast(format!("Nothing to export: {message}"));
            return;
        };

        let path = self.options.export_path.clone();
        let format = ExportFormat::from_path(&path);
        let result = export_graph(graph, format)
            .map_err(|err| err.to_string())
            .and_then(|content| fs::write(&path, content).map_err(|err| err.to_string()));
        match result {
            Ok(()) => self.set_toast(format!("Exported {format} to {}", path.display())),
            Err(err) => self.set_toast(format!("Export failed: {err}")),
        }
    }

    fn yank_plotly_json(&mut self) {
        let Some(graph) = self.outcome.graph() else {
            self.set_toast("Nothing to yank");
            return;
        };
        match export_plotly_json(graph) {
            Ok(json) => self.pending_clipboard = Some(json),
            Err(err) => self.set_toast(format!("Export failed: {err}")),
        }
    }

    fn take_clipboard_request(&mut self) -> Option<String> {
        self.pending_clipboard.take()
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(2),
        });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.toast = None;
        }
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

#[cfg(test)]
mod tests;
