use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{InputMode, Screen, ViewKind};
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    screen: Screen,
    selected_view: ViewKind,
    input_mode: InputMode,
    filter_text: &str,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    let line = match input_mode {
        InputMode::Filter => {
            let mut spans = vec![
                Span::styled(
                    " / ",
                    Style::default()
                        .fg(theme.pill_key_fg)
                        .bg(theme.pill_key_bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {filter_text}"),
                    Style::default().fg(theme.pill_desc_fg),
                ),
                Span::styled("\u{2588}", Style::default().fg(theme.pill_key_bg)),
            ];
            spans.extend(pill_spans("Esc", "Cancel", theme));
            spans.extend(pill_spans("Enter", "Apply", theme));
            Line::from(spans)
        }
        InputMode::Help => {
            let mut spans = Vec::new();
            spans.extend(pill_spans("?", "Close help", theme));
            spans.extend(pill_spans("Esc", "Close help", theme));
            Line::from(spans)
        }
        InputMode::Normal => match screen {
            Screen::Menu => {
                let mut spans = Vec::new();
                spans.extend(pill_spans("\u{2191}\u{2193}", "Select", theme));
                spans.extend(pill_spans("Enter", "Open", theme));
                spans.extend(pill_spans("q", "Quit", theme));
                spans.extend(pill_spans("?", "Help", theme));
                Line::from(spans)
            }
            Screen::Detail => {
                let mut spans = Vec::new();
                spans.extend(pill_spans("Tab", "Back", theme));
                spans.extend(pill_spans("r", "Refresh", theme));
                if selected_view == ViewKind::Processes {
                    spans.extend(pill_spans("s", "Sort", theme));
                    spans.extend(pill_spans("/", "Filter", theme));
                }
                spans.extend(pill_spans("t", "Theme", theme));
                spans.extend(pill_spans("q", "Quit", theme));
                if !filter_text.is_empty() {
                    spans.push(Span::styled(
                        format!("  Filter: {filter_text}"),
                        Style::default().fg(theme.accent),
                    ));
                }
                Line::from(spans)
            }
        },
    };

    frame.render_widget(Paragraph::new(line).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
