pub mod capacity;
pub mod header;
pub mod help;
pub mod menu;
pub mod process_table;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::{App, Screen, View};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(
        frame,
        chunks[0],
        app.mode_label(),
        app.proc_count,
        app.memory_used,
        app.memory_total,
        &app.theme,
    );

    let content_area = chunks[1];
    match app.screen {
        Screen::Menu => menu::render(frame, content_area, app.selected_view, &app.theme),
        Screen::Detail => match &app.view {
            Some(View::Processes(rows)) => process_table::render(
                frame,
                content_area,
                rows,
                &app.filter_text,
                app.sort_mode,
                &app.theme,
            ),
            Some(View::Capacity(report)) => {
                capacity::render(frame, content_area, report, &app.theme)
            }
            // Confirm refreshes before the first detail draw, so an empty
            // view only appears if a refresh produced nothing.
            None => {}
        },
    }

    statusbar::render(
        frame,
        chunks[2],
        app.screen,
        app.selected_view,
        app.input_mode,
        &app.filter_text,
        &app.theme,
    );

    // Help overlay — rendered last to appear on top
    if app.show_help() {
        help::render(frame, frame.area(), &app.help_entries(), &app.theme);
    }
}
