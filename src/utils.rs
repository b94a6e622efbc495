/// Utility functions used throughout the application

use std::path::PathBuf;

/// Get platform-specific debug log path
pub fn get_debug_log_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("notefinder-debug.log");
    path
}

/// Get platform-specific cache fallback path
pub fn get_cache_fallback_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("notefinder-cache");
    path
}

/// Default location of the note database
pub fn get_default_db_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("notefinder").join("notes.db"),
        None => {
            let mut path = std::env::temp_dir();
            path.push("notefinder-data");
            path.push("notes.db");
            path
        }
    }
}

/// Truncate a title to fit `width` terminal cells, adding an ellipsis when cut
pub fn truncate_to_width(text: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthChar;
    use unicode_width::UnicodeWidthStr;

    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
