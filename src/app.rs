use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use time_humanize::{Accuracy, HumanTime, Tense};
use tracing::{debug, info, warn};

use crate::carousel::{
    CarouselConfig, CarouselController, CarouselEvent, SlideChange, SlideWindow,
};
use crate::catalog::{Catalog, HeroSlide, Product, SortOrder};
use crate::config::Config;
use crate::error::CatalogError;
use crate::runtime::DeckEvent;
use crate::transition::TransitionDriver;
use crate::ui::layout::HomeLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Category { slug: String },
    Detail { slug: String },
    Search,
}

/// A carousel together with the animation state the renderer keeps for it
#[derive(Debug)]
pub struct MountedCarousel {
    pub controller: CarouselController,
    pub transition: TransitionDriver,
}

impl MountedCarousel {
    fn mount(
        label: &str,
        len: NonZeroUsize,
        config: CarouselConfig,
        transition: Duration,
        now: Instant,
    ) -> Self {
        let mut controller = CarouselController::new(label, len, config);
        controller.start(now);
        Self {
            controller,
            transition: TransitionDriver::new(transition),
        }
    }

    fn animate(&mut self, change: Option<SlideChange>, now: Instant) {
        if let Some(change) = change {
            self.transition.begin(change, now, &mut self.controller);
        }
    }

    /// Poll timers and animations. Returns true when a redraw is needed.
    fn on_tick(&mut self, now: Instant) -> bool {
        let mut dirty = self.transition.update(now, &mut self.controller);
        for event in self.controller.poll(now) {
            dirty = true;
            if let CarouselEvent::Advanced(change) = event {
                self.transition.begin(change, now, &mut self.controller);
            }
        }
        dirty
    }
}

/// The carousels that live on the home screen. Dropping them clears their timers.
#[derive(Debug)]
pub struct HomeCarousels {
    pub hero: MountedCarousel,
    pub deals: MountedCarousel,
    pub deals_window: SlideWindow,
}

#[derive(Debug, Default, Clone)]
pub struct ListState {
    pub selected: usize,
}

impl ListState {
    fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn down(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct SearchState {
    pub term: String,
    pub order: SortOrder,
    pub list: ListState,
}

#[derive(Debug)]
pub struct App {
    pub catalog: Catalog,
    pub config: Config,
    pub hero_slides: Vec<HeroSlide>,
    pub home: Option<HomeCarousels>,
    pub screen: Screen,
    pub history: Vec<Screen>,
    pub category_list: ListState,
    pub search: SearchState,
    pub area: Rect,
    pub should_quit: bool,
}

impl App {
    pub fn new(catalog: Catalog, config: Config, now: Instant) -> Result<Self, CatalogError> {
        let hero_slides = catalog.hero_slides();
        if hero_slides.is_empty() {
            return Err(CatalogError::Empty("categories"));
        }
        if catalog.products().next().is_none() {
            return Err(CatalogError::Empty("products"));
        }

        let mut app = Self {
            catalog,
            config,
            hero_slides,
            home: None,
            screen: Screen::Home,
            history: Vec::new(),
            category_list: ListState::default(),
            search: SearchState::default(),
            area: Rect::default(),
            should_quit: false,
        };
        app.mount_home(now);
        Ok(app)
    }

    fn mount_home(&mut self, now: Instant) {
        let hero_len = NonZeroUsize::new(self.hero_slides.len()).unwrap_or(NonZeroUsize::MIN);
        let deals_window =
            SlideWindow::new(self.catalog.hot_deals().len(), self.config.deals_visible());

        self.home = Some(HomeCarousels {
            hero: MountedCarousel::mount(
                "hero",
                hero_len,
                self.config.hero_carousel(),
                self.config.transition(),
                now,
            ),
            deals: MountedCarousel::mount(
                "deals",
                deals_window.positions(),
                self.config.deals_carousel(),
                self.config.transition(),
                now,
            ),
            deals_window,
        });
        debug!("home carousels mounted");
    }

    fn navigate(&mut self, screen: Screen, now: Instant) {
        if screen == self.screen {
            return;
        }
        info!(from = ?self.screen, to = ?screen, "navigate");
        if matches!(screen, Screen::Category { .. }) {
            self.category_list = ListState::default();
        }
        let previous = std::mem::replace(&mut self.screen, screen);
        self.history.push(previous);
        self.after_navigation(now);
    }

    fn back(&mut self, now: Instant) {
        match self.history.pop() {
            Some(screen) => {
                self.screen = screen;
                self.after_navigation(now);
            }
            None if self.screen != Screen::Home => {
                self.screen = Screen::Home;
                self.after_navigation(now);
            }
            None => {}
        }
    }

    fn after_navigation(&mut self, now: Instant) {
        match (&self.screen, self.home.is_some()) {
            (Screen::Home, false) => self.mount_home(now),
            (Screen::Home, true) => {}
            (_, true) => {
                // unmount: dropping the controllers clears their timers
                self.home = None;
                debug!("home carousels unmounted");
            }
            (_, false) => {}
        }
    }

    pub fn current_hero_slide(&self) -> Option<&HeroSlide> {
        let home = self.home.as_ref()?;
        self.hero_slides.get(home.hero.controller.current_index())
    }

    /// Deals currently inside the visible window
    pub fn visible_deals(&self) -> Vec<&Product> {
        let deals = self.catalog.hot_deals();
        match &self.home {
            Some(home) => {
                let range = home
                    .deals_window
                    .visible_range(home.deals.controller.current_index());
                deals[range].to_vec()
            }
            None => Vec::new(),
        }
    }

    pub fn search_results(&self) -> Vec<&Product> {
        self.catalog.search(&self.search.term, self.search.order)
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn layout(&self) -> HomeLayout {
        HomeLayout::new(self.area)
    }

    /// Advance timers and animations. Returns true when the screen should be redrawn.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        match self.home.as_mut() {
            Some(home) => {
                let hero = home.hero.on_tick(now);
                let deals = home.deals.on_tick(now);
                hero || deals
            }
            None => false,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.screen.clone() {
            Screen::Home => self.on_home_key(key, now),
            Screen::Category { slug } => self.on_category_key(key, &slug, now),
            Screen::Detail { slug } => self.on_detail_key(key, &slug, now),
            Screen::Search => self.on_search_key(key, now),
        }
    }

    fn on_home_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => {
                self.search = SearchState::default();
                self.navigate(Screen::Search, now);
            }
            KeyCode::Enter => {
                if let Some(slide) = self.current_hero_slide() {
                    let slug = slide.category_slug.clone();
                    self.navigate(Screen::Category { slug }, now);
                }
            }
            KeyCode::Char('h') => {
                if let Some(product) = self.visible_deals().first() {
                    let slug = product.slug.clone();
                    self.navigate(Screen::Detail { slug }, now);
                }
            }
            _ => {
                if let Some(home) = self.home.as_mut() {
                    on_carousel_key(home, key.code, now);
                }
            }
        }
    }

    fn on_category_key(&mut self, key: KeyEvent, slug: &str, now: Instant) {
        let products: Vec<String> = self
            .catalog
            .find_category(slug)
            .map(|c| c.items.iter().map(|p| p.slug.clone()).collect())
            .unwrap_or_default();

        match key.code {
            KeyCode::Esc | KeyCode::Backspace => self.back(now),
            KeyCode::Up => self.category_list.up(),
            KeyCode::Down => self.category_list.down(products.len()),
            KeyCode::Enter => {
                if let Some(slug) = products.get(self.category_list.selected) {
                    let slug = slug.clone();
                    self.navigate(Screen::Detail { slug }, now);
                }
            }
            _ => {}
        }
    }

    fn on_detail_key(&mut self, key: KeyEvent, slug: &str, now: Instant) {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => self.back(now),
            KeyCode::Char('o') => {
                if let Some(product) = self.catalog.find_product(slug) {
                    let url = self.catalog.product_url(product);
                    if webbrowser::Browser::is_available() {
                        if let Err(e) = webbrowser::open(&url) {
                            warn!(%url, "failed to open browser: {e}");
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc => self.back(now),
            KeyCode::Backspace => {
                self.search.term.pop();
                self.search.list = ListState::default();
            }
            KeyCode::Tab => self.search.order = self.search.order.toggled(),
            KeyCode::Up => self.search.list.up(),
            KeyCode::Down => {
                let len = self.search_results().len();
                self.search.list.down(len);
            }
            KeyCode::Enter => {
                let slug = self
                    .search_results()
                    .get(self.search.list.selected)
                    .map(|p| p.slug.clone());
                if let Some(slug) = slug {
                    self.navigate(Screen::Detail { slug }, now);
                }
            }
            KeyCode::Char(c) => {
                self.search.term.push(c);
                self.search.list = ListState::default();
            }
            _ => {}
        }
    }

    /// Route one runtime event. Returns true when the screen should be redrawn.
    pub fn dispatch(&mut self, event: DeckEvent, now: Instant) -> bool {
        match event {
            DeckEvent::Tick => self.on_tick(now),
            DeckEvent::Resize => true,
            DeckEvent::Key(key) => {
                self.on_key(key, now);
                true
            }
            DeckEvent::Mouse(mouse) => {
                self.on_mouse(mouse, now);
                self.screen == Screen::Home
            }
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if self.screen != Screen::Home {
            return;
        }
        let layout = self.layout();
        let hero_len = self.hero_slides.len();
        let Some(home) = self.home.as_mut() else {
            return;
        };

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let inside = layout.in_deals(mouse.column, mouse.row);
                let deals = &mut home.deals.controller;
                if inside && !deals.is_hovered() {
                    deals.pause_on_hover_enter();
                } else if !inside && deals.is_hovered() {
                    deals.pause_on_hover_leave();
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(dot) = layout.dot_at(hero_len, mouse.column, mouse.row) {
                    go_to(&mut home.hero, dot, now);
                } else if layout.deals_prev.contains((mouse.column, mouse.row).into()) {
                    let change = home.deals.controller.previous(now);
                    home.deals.animate(change, now);
                } else if layout.deals_next.contains((mouse.column, mouse.row).into()) {
                    let change = home.deals.controller.next(now);
                    home.deals.animate(change, now);
                }
            }
            _ => {}
        }
    }

    /// Status line for the home screen
    pub fn status_line(&self, now: Instant) -> String {
        let Some(home) = &self.home else {
            return String::new();
        };
        let describe = |name: &str, c: &CarouselController| -> String {
            if c.is_hovered() {
                format!("{name}: paused while hovered")
            } else if let Some(left) = c.resume_in(now) {
                let text = HumanTime::from_seconds(left.as_millis().div_ceil(1000) as i64)
                    .to_text_en(Accuracy::Precise, Tense::Future);
                format!("{name}: paused, autoplay resumes {text}")
            } else if c.is_paused() {
                format!("{name}: paused")
            } else {
                format!("{name}: playing")
            }
        };
        format!(
            "{}  |  {}",
            describe("Hero", &home.hero.controller),
            describe("Deals", &home.deals.controller)
        )
    }
}

fn go_to(carousel: &mut MountedCarousel, index: usize, now: Instant) {
    match carousel.controller.go_to_slide(index, now) {
        Ok(change) => carousel.animate(change, now),
        Err(e) => warn!(carousel = carousel.controller.label(), "{e}"),
    }
}

fn on_carousel_key(home: &mut HomeCarousels, code: KeyCode, now: Instant) {
    match code {
        KeyCode::Left => {
            let change = home.hero.controller.previous(now);
            home.hero.animate(change, now);
        }
        KeyCode::Right => {
            let change = home.hero.controller.next(now);
            home.hero.animate(change, now);
        }
        KeyCode::Char('[') => {
            let change = home.deals.controller.previous(now);
            home.deals.animate(change, now);
        }
        KeyCode::Char(']') => {
            let change = home.deals.controller.next(now);
            home.deals.animate(change, now);
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if index < home.hero.controller.len() {
                go_to(&mut home.hero, index, now);
            }
        }
        _ => {}
    }
}
