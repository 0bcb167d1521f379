use crate::tui::app::Tab;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::Config;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs;
use ratatui::Frame;

pub fn render_tabs(f: &mut Frame, area: Rect, current_tab: Tab, drafts: usize, config: &Config) {
    let active_theme = config.get_active_theme();
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let muted = parse_color(&active_theme.muted);
    let tab_fg = get_contrast_text_color(muted);

    // Padded spans give each tab a box look
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            let title = match tab {
                Tab::Drafts if drafts > 0 => format!("{} ({})", tab.title(), drafts),
                _ => tab.title().to_string(),
            };
            Line::from(vec![
                Span::styled(" ", Style::default().bg(muted)),
                Span::styled(title, Style::default().fg(tab_fg).bg(muted)),
                Span::styled(" ", Style::default().bg(muted)),
            ])
        })
        .collect();

    let highlight_fg = get_contrast_text_color(highlight_bg);

    let tabs = Tabs::new(titles)
        .select(current_tab.index())
        .style(Style::default().fg(fg_color).bg(bg_color))
        .highlight_style(
            Style::default()
                .fg(highlight_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" ")
        .padding("", "");

    f.render_widget(tabs, area);
}
