use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    mode_label: &str,
    proc_count: usize,
    memory_used: u64,
    memory_total: u64,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_branding(frame, chunks[0], mode_label, proc_count, theme);
    render_ram_gauge(frame, chunks[1], memory_used, memory_total, theme);
}

fn render_branding(
    frame: &mut Frame,
    area: Rect,
    mode_label: &str,
    proc_count: usize,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = Line::from(vec![
        Span::styled(
            " proctop ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(mode_label.to_string(), Style::default().fg(theme.text_secondary)),
        Span::raw("  "),
        Span::styled(
            format!("Procs: {proc_count}"),
            Style::default().fg(theme.text_secondary),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), inner);
}

fn render_ram_gauge(
    frame: &mut Frame,
    area: Rect,
    memory_used: u64,
    memory_total: u64,
    theme: &Theme,
) {
    let used_mb = memory_used / 1_048_576;
    let total_mb = memory_total / 1_048_576;
    let ratio = if memory_total > 0 {
        (memory_used as f64 / memory_total as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let ram_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " RAM ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let gauge = Gauge::default()
        .block(ram_block)
        .gauge_style(
            Style::default()
                .fg(theme.gauge_filled)
                .bg(theme.gauge_unfilled),
        )
        .ratio(ratio)
        .label(format!("{used_mb}/{total_mb} MB ({:.0}%)", ratio * 100.0));

    frame.render_widget(gauge, area);
}
