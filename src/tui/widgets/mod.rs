pub mod calendar_view;
pub mod color;
pub mod confirm_delete;
pub mod dashboard;
pub mod event_list;
pub mod event_table;
pub mod event_view;
pub mod filter_modal;
pub mod filters_box;
pub mod help;
pub mod status_bar;
pub mod tabs;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Centered rect taking a percentage of `area`, for popups
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Cut `text` to `max` characters, ending in "..." when shortened
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        text.chars().take(max.saturating_sub(3)).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
