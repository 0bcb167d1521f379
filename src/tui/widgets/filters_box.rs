use crate::tui::widgets::color::parse_color;
use crate::utils::format_key_binding_for_display;
use crate::Config;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_filters_box(f: &mut Frame, area: Rect, summary: &str, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let title = format!(
        "{}: Filters  {}: Clear",
        format_key_binding_for_display(&config.key_bindings.filter),
        format_key_binding_for_display(&config.key_bindings.clear_filters)
    );

    let paragraph = Paragraph::new(summary)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color))
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
