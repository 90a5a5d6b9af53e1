use tracing::level_filters::LevelFilter;

pub const fn get_levelfilter(num: i32) -> LevelFilter {
    match num {
        i32::MIN..=-2 => LevelFilter::ERROR,
        -1 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        2..=i32::MAX => LevelFilter::TRACE,
        0 => LevelFilter::INFO,
    }
}

/// Cut `text` down to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
