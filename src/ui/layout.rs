use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

const ARROW_WIDTH: u16 = 3;

/// Regions of the home screen. Shared by the renderer and by mouse
/// hit-testing so both agree on where the hero dots and deals strip are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeLayout {
    pub header: Rect,
    pub hero: Rect,
    pub dots: Rect,
    pub deals: Rect,
    pub deals_prev: Rect,
    pub deals_cards: Rect,
    pub deals_next: Rect,
    pub status: Rect,
    pub footer: Rect,
}

impl HomeLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // header
                Constraint::Min(8),     // hero
                Constraint::Length(1),  // dots
                Constraint::Length(10), // deals
                Constraint::Length(1),  // status
                Constraint::Length(2),  // footer
            ])
            .split(area);

        let deals = rows[3];
        let strip = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(ARROW_WIDTH),
                Constraint::Min(0),
                Constraint::Length(ARROW_WIDTH),
            ])
            .split(deals);

        Self {
            header: rows[0],
            hero: rows[1],
            dots: rows[2],
            deals,
            deals_prev: strip[0],
            deals_cards: strip[1],
            deals_next: strip[2],
            status: rows[4],
            footer: rows[5],
        }
    }

    /// One cell per dot, centred, with a blank column between dots
    pub fn dot_rects(&self, count: usize) -> Vec<Rect> {
        if count == 0 || self.dots.height == 0 {
            return Vec::new();
        }
        let needed = (count * 2 - 1) as u16;
        let start = self.dots.x + self.dots.width.saturating_sub(needed) / 2;
        (0..count as u16)
            .map(|i| Rect::new(start + i * 2, self.dots.y, 1, 1))
            .filter(|r| r.right() <= self.dots.right())
            .collect()
    }

    pub fn dot_at(&self, count: usize, column: u16, row: u16) -> Option<usize> {
        let pos = Position::new(column, row);
        self.dot_rects(count).iter().position(|r| r.contains(pos))
    }

    pub fn in_deals(&self, column: u16, row: u16) -> bool {
        self.deals.contains(Position::new(column, row))
    }

    /// Equal-width card columns for the visible deals
    pub fn deal_cards(&self, visible: usize) -> Vec<Rect> {
        if visible == 0 {
            return Vec::new();
        }
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, visible as u32); visible])
            .split(self.deals_cards)
            .to_vec()
    }
}
