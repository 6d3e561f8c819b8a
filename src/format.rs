use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    const GB: u64 = 1024 * 1024 * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.0} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Whole megabytes, for the capacity report's totals.
pub fn format_mb(bytes: u64) -> String {
    format!("{} MB", bytes / (1024 * 1024))
}

/// CPU cell text. `None` is an unknown reading and must stay a placeholder,
/// never a fabricated number.
pub fn format_cpu(percent: Option<f32>) -> String {
    match percent {
        Some(p) => format!("{p:.2}%"),
        None => "--".to_string(),
    }
}

/// Pointer-width hexadecimal, as the capacity report prints addresses.
pub fn format_address(addr: u64) -> String {
    format!("{addr:#0width$x}", width = 2 + usize::BITS as usize / 4)
}
