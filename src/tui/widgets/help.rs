use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::popup_area;
use crate::utils::format_key_binding_for_display as key;
use crate::Config;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    let popup_area = popup_area(area, 60, 80);
    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

pub fn build_help_text(config: &Config) -> String {
    let kb = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Navigation:\n");
    text.push_str(&format!("  {} / {}: Switch views\n", key(&kb.tab_left), key(&kb.tab_right)));
    text.push_str(&format!("  {} / {}: Move in list (next/previous day in Calendar)\n", key(&kb.list_up), key(&kb.list_down)));
    text.push_str("  Up / Down: Previous/next week (Calendar)\n");
    text.push_str(&format!("  {} / {}: Previous/next month\n", key(&kb.prev_month), key(&kb.next_month)));
    text.push_str(&format!("  {}: Jump to today\n", key(&kb.today)));
    text.push_str(&format!("  {}: Open event details\n", key(&kb.select)));
    text.push('\n');

    text.push_str("Search & Filters:\n");
    text.push_str(&format!("  {}: Search place, city and notes\n", key(&kb.search)));
    text.push_str(&format!("  {}: Moods, time of day and city\n", key(&kb.filter)));
    text.push_str(&format!("  {}: Clear all filters\n", key(&kb.clear_filters)));
    text.push_str("  Space: Toggle mood (filter window)\n");
    text.push('\n');

    text.push_str("Actions:\n");
    text.push_str(&format!("  {}: Save / unsave event\n", key(&kb.toggle_favorite)));
    text.push_str(&format!("  {}: Delete event or mood\n", key(&kb.delete)));
    text.push_str(&format!("  {}: Publish draft (Drafts)\n", key(&kb.publish)));
    text.push_str(&format!("  {}: New mood (Dashboard)\n", key(&kb.new_mood)));
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Quit\n", key(&kb.quit)));
    text.push_str(&format!("  {}: Show/hide help\n", key(&kb.help)));
    text.push_str(&format!("  {}: Next theme\n", key(&kb.cycle_theme)));
    text.push_str("  Events are created and edited with `parchify add` / `parchify edit`\n");

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_reflects_custom_bindings() {
        let mut config = Config::default();
        config.key_bindings.toggle_favorite = "Ctrl+f".to_string();
        let text = build_help_text(&config);
        assert!(text.contains("+f: Save / unsave event"));
        assert!(text.contains("[ / ]: Previous/next month"));
    }
}
