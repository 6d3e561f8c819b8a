use ratatui::style::Color;

use crate::config::ColorsConfig;

/// Display band for a CPU reading. Unknown is its own band and is never
/// folded into a numeric one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Normal,
    Elevated,
    Critical,
    Unknown,
}

impl Severity {
    pub fn from_percent(percent: Option<f32>) -> Self {
        match percent {
            None => Severity::Unknown,
            Some(p) if p > 80.0 => Severity::Critical,
            Some(p) if p < 20.0 => Severity::Low,
            Some(p) if p < 60.0 => Severity::Normal,
            Some(_) => Severity::Elevated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Truecolor,
    Color256,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "truecolor" | "24bit" => ColorSupport::Truecolor,
            "256" | "256color" => ColorSupport::Color256,
            "mono" | "monochrome" => ColorSupport::Mono,
            _ => ColorSupport::Auto,
        }
    }
}

pub fn detect_color_support() -> ColorSupport {
    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorSupport::Truecolor;
    }
    ColorSupport::Color256
}

pub fn resolve_color_support(config: &str) -> ColorSupport {
    let parsed = ColorSupport::from_config_str(config);
    if parsed == ColorSupport::Auto {
        detect_color_support()
    } else {
        parsed
    }
}

/// User overrides for the severity colors, as hex strings (empty = keep
/// the theme's color).
#[derive(Debug, Clone)]
pub struct SeverityOverrides {
    pub low: String,
    pub normal: String,
    pub elevated: String,
    pub critical: String,
}

impl SeverityOverrides {
    pub fn from_config(colors: &ColorsConfig) -> Self {
        Self {
            low: colors.sev_low.clone(),
            normal: colors.sev_normal.clone(),
            elevated: colors.sev_elevated.clone(),
            critical: colors.sev_critical.clone(),
        }
    }
}

pub fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub statusbar_bg: Color,
    pub overlay_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub gauge_filled: Color,
    pub gauge_unfilled: Color,
    pub sev_low: Color,
    pub sev_normal: Color,
    pub sev_elevated: Color,
    pub sev_critical: Color,
    pub sev_unknown: Color,
}

impl Theme {
    pub fn from_config(
        theme_name: &str,
        overrides: &SeverityOverrides,
        support: ColorSupport,
    ) -> Self {
        let mut theme = match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "mono" | "monochrome" => Self::mono(),
            _ => Self::dark(),
        };

        if support == ColorSupport::Mono {
            theme = Self::mono();
        }

        theme.apply_severity_overrides(overrides);
        theme
    }

    pub fn next(&self, overrides: &SeverityOverrides, support: ColorSupport) -> Self {
        let next_name = match self.name {
            "dark" => "light",
            "light" => "mono",
            _ => "dark",
        };
        if next_name == "mono" {
            let mut theme = Self::mono();
            theme.apply_severity_overrides(overrides);
            theme
        } else {
            Self::from_config(next_name, overrides, support)
        }
    }

    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Low => self.sev_low,
            Severity::Normal => self.sev_normal,
            Severity::Elevated => self.sev_elevated,
            Severity::Critical => self.sev_critical,
            Severity::Unknown => self.sev_unknown,
        }
    }

    fn apply_severity_overrides(&mut self, overrides: &SeverityOverrides) {
        if let Some(c) = parse_hex_color(&overrides.low) {
            self.sev_low = c;
        }
        if let Some(c) = parse_hex_color(&overrides.normal) {
            self.sev_normal = c;
        }
        if let Some(c) = parse_hex_color(&overrides.elevated) {
            self.sev_elevated = c;
        }
        if let Some(c) = parse_hex_color(&overrides.critical) {
            self.sev_critical = c;
        }
    }

    fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Rgb(94, 129, 172),
            header_accent_fg: Color::Rgb(236, 239, 244),
            statusbar_bg: Color::Rgb(36, 40, 52),
            overlay_border: Color::DarkGray,
            text_primary: Color::Rgb(216, 222, 233),
            text_secondary: Color::Gray,
            accent: Color::Yellow,
            pill_key_bg: Color::Rgb(94, 129, 172),
            pill_key_fg: Color::Rgb(236, 239, 244),
            pill_desc_fg: Color::Gray,
            surface_bg: Color::Rgb(30, 33, 43),
            gauge_filled: Color::Rgb(163, 190, 140),
            gauge_unfilled: Color::Rgb(59, 66, 82),
            sev_low: Color::Cyan,
            sev_normal: Color::Green,
            sev_elevated: Color::Rgb(255, 165, 0),
            sev_critical: Color::Red,
            sev_unknown: Color::DarkGray,
        }
    }

    fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Rgb(52, 101, 164),
            header_accent_fg: Color::White,
            statusbar_bg: Color::Rgb(222, 222, 222),
            overlay_border: Color::Gray,
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            accent: Color::Rgb(180, 120, 0),
            pill_key_bg: Color::Rgb(52, 101, 164),
            pill_key_fg: Color::White,
            pill_desc_fg: Color::DarkGray,
            surface_bg: Color::Rgb(238, 238, 238),
            gauge_filled: Color::Rgb(78, 154, 6),
            gauge_unfilled: Color::Rgb(211, 215, 207),
            sev_low: Color::Blue,
            sev_normal: Color::Rgb(78, 154, 6),
            sev_elevated: Color::Rgb(196, 120, 0),
            sev_critical: Color::Rgb(204, 0, 0),
            sev_unknown: Color::Gray,
        }
    }

    fn mono() -> Self {
        Theme {
            name: "mono",
            header_accent_bg: Color::White,
            header_accent_fg: Color::Black,
            statusbar_bg: Color::Black,
            overlay_border: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            accent: Color::White,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::Gray,
            surface_bg: Color::Black,
            gauge_filled: Color::White,
            gauge_unfilled: Color::DarkGray,
            sev_low: Color::Gray,
            sev_normal: Color::White,
            sev_elevated: Color::White,
            sev_critical: Color::White,
            sev_unknown: Color::DarkGray,
        }
    }
}
