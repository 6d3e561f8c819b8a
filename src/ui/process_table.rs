use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::app::SortMode;
use crate::format::{format_bytes, format_cpu, truncate_unicode};
use crate::system::process::ProcessRow;
use crate::ui::theme::{Severity, Theme};

const NAME_WIDTH: usize = 32;

/// Filter and order the rows for display. Pure so the selection logic is
/// testable without a terminal.
pub fn visible_rows<'a>(
    rows: &'a [ProcessRow],
    filter_text: &str,
    sort_mode: SortMode,
) -> Vec<&'a ProcessRow> {
    let filter_lower = filter_text.to_lowercase();
    let mut visible: Vec<&ProcessRow> = rows
        .iter()
        .filter(|r| filter_lower.is_empty() || r.name.to_lowercase().contains(&filter_lower))
        .collect();

    match sort_mode {
        SortMode::Pid => visible.sort_by_key(|r| r.pid),
        SortMode::Cpu => visible.sort_by(|a, b| {
            // Unknown readings sink below every known one.
            let ca = a.cpu_percent.unwrap_or(-1.0);
            let cb = b.cpu_percent.unwrap_or(-1.0);
            cb.partial_cmp(&ca).unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortMode::Memory => visible.sort_by(|a, b| b.memory_bytes.cmp(&a.memory_bytes)),
        SortMode::Name => visible.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
    }
    visible
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    rows: &[ProcessRow],
    filter_text: &str,
    sort_mode: SortMode,
    theme: &Theme,
) {
    let visible = visible_rows(rows, filter_text, sort_mode);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" Processes ({}) — sort: {} ", visible.len(), sort_mode.label()),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ));

    let header = Row::new(["PID", "Process Name", "CPU Usage", "Memory Usage"]).style(
        Style::default()
            .fg(theme.sev_normal)
            .add_modifier(Modifier::BOLD),
    );

    let table_rows: Vec<Row> = visible
        .iter()
        .map(|r| {
            let severity = Severity::from_percent(r.cpu_percent);
            Row::new(vec![
                Cell::from(r.pid.to_string()).style(Style::default().fg(theme.text_primary)),
                Cell::from(truncate_unicode(&r.name, NAME_WIDTH))
                    .style(Style::default().fg(theme.text_primary)),
                Cell::from(format_cpu(r.cpu_percent))
                    .style(Style::default().fg(theme.severity_color(severity))),
                Cell::from(format_bytes(r.memory_bytes))
                    .style(Style::default().fg(theme.text_secondary)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(16),
        Constraint::Length(10),
        Constraint::Length(13),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(block)
        .column_spacing(2);

    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pid: u32, name: &str, cpu: Option<f32>, memory: u64) -> ProcessRow {
        ProcessRow {
            pid,
            name: name.to_string(),
            cpu_percent: cpu,
            memory_bytes: memory,
        }
    }

    #[test]
    fn filter_matches_case_insensitively() {
        let rows = vec![
            row(1, "Systemd", None, 10),
            row(2, "bash", None, 20),
            row(3, "system_worker", None, 30),
        ];
        let visible = visible_rows(&rows, "system", SortMode::Pid);
        let pids: Vec<u32> = visible.iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![1, 3]);
    }

    #[test]
    fn cpu_sort_sinks_unknown_readings() {
        let rows = vec![
            row(1, "idle", Some(2.0), 0),
            row(2, "fresh", None, 0),
            row(3, "busy", Some(90.0), 0),
        ];
        let visible = visible_rows(&rows, "", SortMode::Cpu);
        let pids: Vec<u32> = visible.iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![3, 1, 2]);
    }

    #[test]
    fn memory_sort_is_descending() {
        let rows = vec![row(1, "a", None, 5), row(2, "b", None, 50), row(3, "c", None, 25)];
        let visible = visible_rows(&rows, "", SortMode::Memory);
        let pids: Vec<u32> = visible.iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![2, 3, 1]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let rows = vec![
            row(1, "Zebra", None, 0),
            row(2, "alpha", None, 0),
            row(3, "Beta", None, 0),
        ];
        let visible = visible_rows(&rows, "", SortMode::Name);
        let names: Vec<&str> = visible.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "Beta", "Zebra"]);
    }

    #[test]
    fn empty_rows_render_header_only() {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        let theme = crate::ui::theme::Theme::from_config(
            "dark",
            &crate::ui::theme::SeverityOverrides {
                low: String::new(),
                normal: String::new(),
                elevated: String::new(),
                critical: String::new(),
            },
            crate::ui::theme::ColorSupport::Truecolor,
        );

        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                render(frame, frame.area(), &[], "", SortMode::Pid, &theme);
            })
            .unwrap();

        let buf = terminal.backend().buffer();
        let mut content = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                content.push_str(buf.cell((x, y)).unwrap().symbol());
            }
        }
        assert!(content.contains("PID"));
        assert!(content.contains("Process Name"));
        assert!(content.contains("Processes (0)"));
    }
}
