// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, footer, help, and preview styling helpers used by TUI rendering.
fn stack_main_panes_vertically(area: Rect) -> bool {
    area.width < 90
}

fn footer_uses_compact_mode(area: Rect) -> bool {
    stack_main_panes_vertically(area)
}

fn panel_title(label: &str, key: &str) -> String {
    format!("─[{key}]─ {label} ")
}

fn header_lines(theme: &TuiTheme) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(APP_TITLE.to_owned(), theme.heading_style())),
        Line::from(Span::styled(
            APP_BYLINE.to_owned(),
            theme.prompt_style().add_modifier(Modifier::ITALIC),
        )),
    ]
}

fn footer_help_line(app: &App, compact: bool) -> Line<'static> {
    let theme = &app.theme;
    let mut spans = Vec::<Span<'static>>::new();

    push_footer_entry(&mut spans, theme, "next", "Tab");
    if !compact {
        push_footer_entry(&mut spans, theme, "prev", "S-Tab");
    }
    if matches!(app.focus, FormField::Value(_)) {
        push_footer_entry(&mut spans, theme, "step", "+/-");
    }
    push_footer_entry(&mut spans, theme, "export", "^S");
    push_footer_entry(&mut spans, theme, "yank", "^Y");
    if !compact {
        push_footer_entry(&mut spans, theme, "reset", "^R");
    }
    push_footer_entry(&mut spans, theme, "help", "F1");
    push_footer_entry(&mut spans, theme, "quit", "Esc");

    if let Some(toast) = app.toast.as_ref() {
        spans.push(Span::styled("  ".to_owned(), theme.footer_label_style()));
        spans.push(Span::styled(toast.message.clone(), theme.prompt_style()));
    }

    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, theme: &TuiTheme, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ".to_owned(), theme.footer_label_style()));
    }
    spans.push(Span::styled(format!("{}:", footer_label_ucfirst(label)), theme.footer_label_style()));
    spans.push(Span::styled(value.to_owned(), theme.footer_key_style()));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

const HELP_ENTRIES: [(&str, &str); 11] = [
    ("Tab/↓/Enter", "next field"),
    ("Shift-Tab/↑", "previous field"),
    ("+/-", "step the focused value by one"),
    ("Backspace", "delete last character"),
    ("Ctrl-U", "clear the focused field"),
    ("Ctrl-R", "reset the form"),
    ("Ctrl-S", "export the diagram to the export path"),
    ("Ctrl-Y", "yank Plotly JSON (OSC52)"),
    ("←/→, PgUp/PgDn", "scroll the preview"),
    ("F1", "toggle this help"),
    ("Esc/Ctrl-C", "quit"),
];

fn render_help(frame: &mut Frame<'_>, app: &App, main_area: Rect) {
    let area = centered_rect(70, 70, main_area);
    frame.render_widget(Clear, area);

    let key_style = app.theme.footer_key_style();
    let key_col_width = HELP_ENTRIES.iter().map(|(key, _)| text_len(key)).max().unwrap_or(0);

    let mut lines = vec![
        Line::from(Span::styled("--- Keys ---", app.theme.heading_style())),
        Line::from(""),
    ];
    lines.extend(HELP_ENTRIES.iter().map(|(key, desc)| help_kv(key, desc, key_col_width, key_style)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Export path: {}", app.options.export_path.display()),
        app.theme.prompt_style(),
    )));

    let paragraph = Paragraph::new(Text::from(lines))
        .style(app.theme.base_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(app.theme.panel_border_style(true)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Styles a rendered diagram: band cells get the band color, spans of `focus` get the highlight.
fn styled_preview_text(
    render: &AnnotatedRender,
    focus: Option<GraphRef>,
    theme: &TuiTheme,
) -> Text<'static> {
    let spans = focus.and_then(|focus| render.highlight_index.get(&focus));
    let highlighted = |y: usize, x: usize| {
        spans.is_some_and(|spans| spans.iter().any(|&(sy, x0, x1)| sy == y && x0 <= x && x <= x1))
    };

    let lines = render
        .text
        .split('\n')
        .enumerate()
        .map(|(y, line)| {
            let mut out = Vec::<Span<'static>>::new();
            let mut run = String::new();
            let mut run_style = theme.base_style();
            for (x, ch) in line.chars().enumerate() {
                let style = if highlighted(y, x) {
                    theme.highlight_style()
                } else if ch == SANKEY_BAND || ch == SANKEY_EMPTY_LINK {
                    theme.band_style()
                } else {
                    theme.base_style()
                };
                if style != run_style && !run.is_empty() {
                    out.push(Span::styled(std::mem::take(&mut run), run_style));
                }
                run_style = style;
                run.push(ch);
            }
            if !run.is_empty() {
                out.push(Span::styled(run, run_style));
            }
            Line::from(out)
        })
        .collect::<Vec<_>>();

    Text::from(lines)
}
