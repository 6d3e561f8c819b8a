use std::time::Instant;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, parse_key};
use crate::system::capacity::{self, CapacityReport};
use crate::system::collector::Collector;
use crate::system::platform;
use crate::system::process::{ProcessRow, build_rows};
use crate::system::sampler::{CpuSampler, CpuTimeSample};
use crate::ui::theme::{ColorSupport, SeverityOverrides, Theme, resolve_color_support};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Detail,
}

/// Which view the menu has selected (and detail mode renders).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Processes,
    SystemInfo,
}

impl ViewKind {
    /// Two entries, so cycling either direction flips the selection.
    pub fn toggled(self) -> Self {
        match self {
            ViewKind::Processes => ViewKind::SystemInfo,
            ViewKind::SystemInfo => ViewKind::Processes,
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "system" | "systeminfo" | "system_information" | "capacity" => ViewKind::SystemInfo,
            _ => ViewKind::Processes,
        }
    }
}

/// Rendered content for detail mode. A closed set dispatched by the
/// renderer rather than branches scattered across the loop.
#[derive(Debug)]
pub enum View {
    Processes(Vec<ProcessRow>),
    Capacity(CapacityReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Filter,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Pid,
    Cpu,
    Memory,
    Name,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Pid => SortMode::Cpu,
            SortMode::Cpu => SortMode::Memory,
            SortMode::Memory => SortMode::Name,
            SortMode::Name => SortMode::Pid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Pid => "PID",
            SortMode::Cpu => "CPU",
            SortMode::Memory => "Memory",
            SortMode::Name => "Name",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "cpu" => SortMode::Cpu,
            "memory" | "mem" => SortMode::Memory,
            "name" => SortMode::Name,
            _ => SortMode::Pid,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub confirm: KeyCode,
    pub dismiss: KeyCode,
    pub refresh: KeyCode,
    pub cycle_sort: KeyCode,
    pub cycle_theme: KeyCode,
    pub filter: KeyCode,
    pub help: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            confirm: parse_key(&kb.confirm).unwrap_or(KeyCode::Enter),
            dismiss: parse_key(&kb.dismiss).unwrap_or(KeyCode::Tab),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
            cycle_sort: parse_key(&kb.cycle_sort).unwrap_or(KeyCode::Char('s')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            filter: parse_key(&kb.filter).unwrap_or(KeyCode::Char('/')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
        }
    }

    /// Returns (key_label, description) pairs for the help overlay.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let mut entries = vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.confirm), "Open selected view"),
            (key_label(self.dismiss), "Back to menu"),
            (key_label(self.refresh), "Refresh"),
            (key_label(self.cycle_sort), "Cycle sort mode"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.filter), "Filter processes"),
            (key_label(self.help), "Toggle help"),
        ];
        entries.push(("↑↓".to_string(), "Select view"));
        entries.push(("Ctrl+C".to_string(), "Quit (always)"));
        entries
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        _ => "?".to_string(),
    }
}

pub struct App {
    pub running: bool,
    pub screen: Screen,
    pub selected_view: ViewKind,
    pub view: Option<View>,
    pub input_mode: InputMode,
    pub filter_text: String,
    pub sort_mode: SortMode,
    pub auto_refresh: bool,
    pub collector: Collector,
    pub sampler: CpuSampler,
    pub theme: Theme,
    pub color_support: ColorSupport,
    pub keybinds: ResolvedKeybinds,
    pub proc_count: usize,
    pub memory_total: u64,
    pub memory_used: u64,
    severity_overrides: SeverityOverrides,
}

impl App {
    pub fn new(config: Config) -> Self {
        let collector = Collector::new();
        let color_support = resolve_color_support("auto");
        let severity_overrides = SeverityOverrides::from_config(&config.colors);
        let theme = Theme::from_config(&config.colors.theme, &severity_overrides, color_support);
        let keybinds = ResolvedKeybinds::from_config(&config.keybinds);

        App {
            running: true,
            screen: Screen::Menu,
            selected_view: ViewKind::from_str_config(&config.general.default_view),
            view: None,
            input_mode: InputMode::Normal,
            filter_text: String::new(),
            sort_mode: SortMode::from_str_config(&config.general.default_sort),
            auto_refresh: config.general.auto_refresh,
            collector,
            sampler: CpuSampler::new(),
            theme,
            color_support,
            keybinds,
            proc_count: 0,
            memory_total: 0,
            memory_used: 0,
            severity_overrides,
        }
    }

    /// Take the initial snapshot. An empty process table at startup means
    /// the platform cannot enumerate at all, which is fatal.
    pub fn startup_probe(&mut self) -> Result<()> {
        let records = self.collector.enumerate();
        if records.is_empty() {
            return Err(eyre!("failed to take an initial process snapshot"));
        }
        self.proc_count = records.len();
        self.memory_total = self.collector.memory_total();
        self.memory_used = self.collector.memory_used();
        Ok(())
    }

    pub fn refresh_data(&mut self) {
        tracing::debug!(view = ?self.selected_view, "refreshing");
        let records = self.collector.enumerate();
        self.proc_count = records.len();
        self.memory_total = self.collector.memory_total();
        self.memory_used = self.collector.memory_used();

        match self.selected_view {
            ViewKind::Processes => {
                let core_count = self.collector.core_count();
                let collector = &self.collector;
                let rows = build_rows(
                    records,
                    |pid| {
                        let times = platform::process_cpu_times(pid)?;
                        let memory = collector.process_memory(pid)?;
                        Some((
                            CpuTimeSample {
                                times,
                                taken_at: Instant::now(),
                            },
                            memory,
                        ))
                    },
                    &mut self.sampler,
                    core_count,
                );
                self.view = Some(View::Processes(rows));
            }
            ViewKind::SystemInfo => {
                self.view = Some(View::Capacity(capacity::report(&self.collector)));
            }
        }
    }

    /// Timer tick: drives the same refresh path as a manual keypress, only
    /// while a detail view is showing.
    pub fn on_tick(&mut self) -> bool {
        if self.auto_refresh && self.screen == Screen::Detail && self.input_mode == InputMode::Normal
        {
            self.refresh_data();
            return true;
        }
        false
    }

    pub fn mode_label(&self) -> &'static str {
        match self.screen {
            Screen::Menu => "menu",
            Screen::Detail => match self.selected_view {
                ViewKind::Processes => "processes",
                ViewKind::SystemInfo => "system information",
            },
        }
    }

    /// Terminal title for the current state.
    pub fn title(&self) -> &'static str {
        match self.screen {
            Screen::Menu => "proctop",
            Screen::Detail => match self.selected_view {
                ViewKind::Processes => "proctop — processes",
                ViewKind::SystemInfo => "proctop — system information",
            },
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => match self.screen {
                Screen::Menu => self.map_key_menu(key),
                Screen::Detail => self.map_key_detail(key),
            },
            InputMode::Filter => self.map_key_filter(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_menu(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        // Arrow keys are hardwired (not configurable)
        if let KeyCode::Up = code {
            return Action::SelectPrev;
        }
        if let KeyCode::Down = code {
            return Action::SelectNext;
        }

        if code == kb.confirm {
            return Action::Confirm;
        }
        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.cycle_theme {
            return Action::CycleTheme;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }

        // The dismiss key (and anything else) has no meaning in the menu.
        Action::None
    }

    fn map_key_detail(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        if code == kb.dismiss || code == KeyCode::Esc {
            return Action::Dismiss;
        }
        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.refresh {
            return Action::Refresh;
        }
        if code == kb.cycle_theme {
            return Action::CycleTheme;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }
        if self.selected_view == ViewKind::Processes {
            if code == kb.cycle_sort {
                return Action::CycleSortMode;
            }
            if code == kb.filter {
                return Action::EnterFilterMode;
            }
        }

        // Input is blocking and there is no other meaning left for a key
        // in detail mode, so anything unbound acts as a manual refresh.
        Action::Refresh
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    fn map_key_filter(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::ClearFilter,
            KeyCode::Enter => Action::ExitFilterMode,
            KeyCode::Backspace => {
                let mut text = self.filter_text.clone();
                text.pop();
                Action::UpdateFilter(text)
            }
            KeyCode::Char(c) => {
                let mut text = self.filter_text.clone();
                text.push(c);
                Action::UpdateFilter(text)
            }
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SelectPrev | Action::SelectNext => {
                if self.screen == Screen::Menu {
                    self.selected_view = self.selected_view.toggled();
                }
            }
            Action::Confirm => {
                if self.screen == Screen::Menu {
                    self.screen = Screen::Detail;
                    self.refresh_data();
                }
            }
            Action::Dismiss => {
                if self.screen == Screen::Detail {
                    self.screen = Screen::Menu;
                    self.view = None;
                }
            }
            Action::Refresh => {
                if self.screen == Screen::Detail {
                    self.refresh_data();
                }
            }
            Action::CycleSortMode => {
                self.sort_mode = self.sort_mode.next();
            }
            Action::CycleTheme => {
                self.theme = self.theme.next(&self.severity_overrides, self.color_support);
            }
            Action::EnterFilterMode => {
                self.input_mode = InputMode::Filter;
            }
            Action::ExitFilterMode => {
                self.input_mode = InputMode::Normal;
            }
            Action::ClearFilter => {
                self.filter_text.clear();
                self.input_mode = InputMode::Normal;
            }
            Action::UpdateFilter(text) => {
                self.filter_text = text;
            }
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::None => {}
        }
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }
}
