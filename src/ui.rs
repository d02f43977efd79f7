pub mod home;
pub mod layout;
pub mod pages;
pub mod screen;

use std::time::Instant;

use ratatui::{
    style::{Color, Modifier, Style},
    Frame,
};

use crate::app::App;

pub(crate) fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn dim_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub(crate) fn accent_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Render the current screen. Records the frame area on the app so mouse
/// hit-testing matches what was drawn.
pub fn draw(app: &mut App, f: &mut Frame, now: Instant) {
    app.set_area(f.area());
    screen::current_screen(&app.screen).render(app, f, now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Screen;
    use crate::catalog::Catalog;
    use crate::clock::{Clock, ManualClock};
    use crate::config::Config;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &mut App, now: Instant) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(app, f, now)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn app(clock: &ManualClock) -> App {
        App::new(Catalog::bundled().unwrap(), Config::default(), clock.now()).unwrap()
    }

    #[test]
    fn home_screen_shows_hero_and_deals() {
        let clock = ManualClock::new();
        let mut app = app(&clock);
        let content = rendered(&mut app, clock.now());
        assert!(content.contains("Electro Actuated Pumps"));
        assert!(content.contains("Hot Deals"));
        assert!(content.contains("Aquaflow"));
        assert!(content.contains("●"));
        assert_eq!(app.area.width, 100);
    }

    #[test]
    fn home_screen_renders_mid_transition() {
        let clock = ManualClock::new();
        let mut app = app(&clock);
        app.on_key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE), clock.now());
        clock.advance_ms(100);
        let content = rendered(&mut app, clock.now());
        assert!(content.contains("Mechanical Actuated Pumps"));
    }

    #[test]
    fn detail_screen_shows_specifications() {
        let clock = ManualClock::new();
        let mut app = app(&clock);
        app.screen = Screen::Detail {
            slug: "triplex-plunger-pump".into(),
        };
        let content = rendered(&mut app, clock.now());
        assert!(content.contains("Triplex Plunger Pump"));
        assert!(content.contains("150 bar"));
    }

    #[test]
    fn unknown_detail_slug_renders_not_found() {
        let clock = ManualClock::new();
        let mut app = app(&clock);
        app.screen = Screen::Detail {
            slug: "missing".into(),
        };
        let content = rendered(&mut app, clock.now());
        assert!(content.contains("Product not found"));
    }

    #[test]
    fn search_screen_shows_count() {
        let clock = ManualClock::new();
        let mut app = app(&clock);
        app.screen = Screen::Search;
        app.search.term = "hydraulic".into();
        let content = rendered(&mut app, clock.now());
        assert!(content.contains("3 products"));
    }

    #[test]
    fn empty_search_shows_hint() {
        let clock = ManualClock::new();
        let mut app = app(&clock);
        app.screen = Screen::Search;
        app.search.term = "zzz".into();
        let content = rendered(&mut app, clock.now());
        assert!(content.contains("No products found"));
    }

    #[test]
    fn category_screen_lists_items() {
        let clock = ManualClock::new();
        let mut app = app(&clock);
        app.screen = Screen::Category {
            slug: "plunger-pumps".into(),
        };
        let content = rendered(&mut app, clock.now());
        assert!(content.contains("Packed Plunger Metering Pump"));
        assert!(content.contains("High Pressure Injection Pump"));
    }
}
