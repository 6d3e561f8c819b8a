use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::format::{format_address, format_mb};
use crate::system::capacity::CapacityReport;
use crate::ui::theme::Theme;

const UNAVAILABLE: &str = "unavailable";

/// The report as (label, value) pairs. Pure so the exact text is testable;
/// fields the platform could not provide read "unavailable".
pub fn report_lines(report: &CapacityReport) -> Vec<(String, String)> {
    let (min_addr, max_addr) = match report.address_bounds {
        Some((min, max)) => (format_address(min), format_address(max)),
        None => (UNAVAILABLE.to_string(), UNAVAILABLE.to_string()),
    };
    let (virt_total, virt_avail) = match report.virtual_memory {
        Some(vm) => (format_mb(vm.total), format_mb(vm.available)),
        None => (UNAVAILABLE.to_string(), UNAVAILABLE.to_string()),
    };

    vec![
        (
            "Processor Architecture".to_string(),
            report.architecture.label().to_string(),
        ),
        (
            "Number of Processors".to_string(),
            report.logical_cpus.to_string(),
        ),
        (
            "Page Size".to_string(),
            report
                .page_size
                .map(|s| format!("{s} bytes"))
                .unwrap_or_else(|| UNAVAILABLE.to_string()),
        ),
        ("Minimum Application Address".to_string(), min_addr),
        ("Maximum Application Address".to_string(), max_addr),
        (
            "Total Physical Memory".to_string(),
            format_mb(report.physical_total),
        ),
        (
            "Available Physical Memory".to_string(),
            format_mb(report.physical_available),
        ),
        ("Total Virtual Memory".to_string(), virt_total),
        ("Available Virtual Memory".to_string(), virt_avail),
    ]
}

pub fn render(frame: &mut Frame, area: Rect, report: &CapacityReport, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " System Information ",
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ));

    let lines: Vec<Line> = report_lines(report)
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!(" {label:<28}"),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(value, Style::default().fg(theme.text_primary)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
