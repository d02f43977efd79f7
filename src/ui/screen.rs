use std::time::Instant;

use ratatui::Frame;

use crate::app::{App, Screen};
use crate::ui::{home, pages};

/// A UI screen boundary: responsible for rendering one page of the showcase
pub trait View {
    fn render(&self, app: &App, f: &mut Frame, now: Instant);
}

pub struct HomeView;

impl View for HomeView {
    fn render(&self, app: &App, f: &mut Frame, now: Instant) {
        home::render_home(app, f, now);
    }
}

pub struct CategoryView<'a> {
    pub slug: &'a str,
}

impl View for CategoryView<'_> {
    fn render(&self, app: &App, f: &mut Frame, _now: Instant) {
        pages::render_category(app, self.slug, f);
    }
}

pub struct DetailView<'a> {
    pub slug: &'a str,
}

impl View for DetailView<'_> {
    fn render(&self, app: &App, f: &mut Frame, _now: Instant) {
        pages::render_detail(app, self.slug, f);
    }
}

pub struct SearchView;

impl View for SearchView {
    fn render(&self, app: &App, f: &mut Frame, _now: Instant) {
        pages::render_search(app, f);
    }
}

/// Helper to construct the view for the current screen
pub fn current_screen(screen: &Screen) -> Box<dyn View + '_> {
    match screen {
        Screen::Home => Box::new(HomeView),
        Screen::Category { slug } => Box::new(CategoryView { slug }),
        Screen::Detail { slug } => Box::new(DetailView { slug }),
        Screen::Search => Box::new(SearchView),
    }
}
