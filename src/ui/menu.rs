use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::ViewKind;
use crate::ui::theme::Theme;

const ENTRIES: [(ViewKind, &str); 2] = [
    (ViewKind::Processes, "Display all processes"),
    (ViewKind::SystemInfo, "Display system information"),
];

pub fn render(frame: &mut Frame, area: Rect, selected: ViewKind, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Select a view ",
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::raw("")];
    for (kind, label) in ENTRIES {
        let line = if kind == selected {
            Line::from(Span::styled(
                format!(" >> {label}"),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                format!("    {label}"),
                Style::default().fg(theme.text_secondary),
            ))
        };
        lines.push(line);
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
