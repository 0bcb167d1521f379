use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub tabs_area: Rect,
    pub sidebar_area: Rect,
    pub main_area: Rect,
    pub filters_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum inner size: sidebar (28) + main (20) wide, and tabs, content,
    /// filters box and status bar tall
    pub const MIN_WIDTH: u16 = 48;
    pub const MIN_HEIGHT: u16 = 12;

    const SIDEBAR_WIDTH_PERCENT: u16 = 35;
    const SIDEBAR_MIN_WIDTH: u16 = 28;

    pub fn calculate(size: Rect, sidebar_collapsed: bool) -> Self {
        let width = size.width.max(Self::MIN_WIDTH + 2);
        let height = size.height.max(Self::MIN_HEIGHT + 2);
        let size = Rect::new(size.x, size.y, width, height);

        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        // main keeps at least 20 columns
        let sidebar_width = if sidebar_collapsed {
            0
        } else {
            ((inner_area.width * Self::SIDEBAR_WIDTH_PERCENT) / 100)
                .max(Self::SIDEBAR_MIN_WIDTH)
                .min(inner_area.width.saturating_sub(20))
        };

        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tabs
                Constraint::Min(1),    // Content
                Constraint::Length(3), // Filters
                Constraint::Length(1), // Status
            ])
            .split(inner_area);

        let horizontal = RatLayout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(1)])
            .split(vertical[1]);

        Self {
            inner_area,
            tabs_area: vertical[0],
            sidebar_area: horizontal[0],
            main_area: horizontal[1],
            filters_area: vertical[2],
            status_area: vertical[3],
        }
    }
}
