use std::time::Instant;

use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, HomeCarousels};
use crate::catalog::{truncate_name, HeroSlide, Product, CARD_NAME_WIDTH};
use crate::ui::{accent_style, dim_style, layout::HomeLayout, title_style};

/// Columns the hero content slides in from at the start of a transition
const SLIDE_IN_COLUMNS: f64 = 12.0;

pub fn render_home(app: &App, f: &mut Frame, now: Instant) {
    let layout = HomeLayout::new(f.area());

    render_header(app, f, layout.header);

    let Some(home) = &app.home else {
        return;
    };

    if let Some(slide) = app.current_hero_slide() {
        let offset = slide_offset(home, now, layout.hero.width);
        render_hero(slide, f, layout.hero, offset);
    }
    render_dots(app, home, f, &layout);
    render_deals(app, home, f, &layout);

    let status = Paragraph::new(Span::styled(app.status_line(now), dim_style()))
        .alignment(Alignment::Center);
    f.render_widget(status, layout.status);

    render_footer(app, f, layout.footer);
}

fn slide_offset(home: &HomeCarousels, now: Instant, width: u16) -> u16 {
    match home.hero.transition.active() {
        Some(t) => {
            let remaining = 1.0 - t.progress(now);
            ((remaining * SLIDE_IN_COLUMNS) as u16).min(width / 2)
        }
        None => 0,
    }
}

fn render_header(app: &App, f: &mut Frame, area: Rect) {
    let company = &app.catalog.company;
    let header = Paragraph::new(vec![
        Line::from(Span::styled(company.name.clone(), title_style())),
        Line::from(Span::styled(company.tagline.clone(), dim_style())),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn render_hero(slide: &HeroSlide, f: &mut Frame, area: Rect, offset: u16) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", slide.title), title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let inner = Rect {
        x: inner.x + offset.min(inner.width),
        width: inner.width.saturating_sub(offset),
        ..inner
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let stats = slide
        .stats
        .iter()
        .flat_map(|s| {
            [
                Span::styled(s.value.clone(), accent_style().add_modifier(Modifier::BOLD)),
                Span::raw(format!(" {}   ", s.label)),
            ]
        })
        .collect::<Vec<_>>();

    let copy = vec![
        Line::from(Span::styled(slide.subtitle.clone(), dim_style())),
        Line::default(),
        Line::from(slide.description.clone()),
        Line::default(),
        Line::from(stats),
        Line::default(),
        Line::from(vec![
            Span::styled(
                format!("[Enter] {}", slide.cta.primary.text),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::raw("  "),
            Span::styled(format!("{} ›", slide.cta.secondary.text), accent_style()),
        ]),
    ];
    f.render_widget(Paragraph::new(copy).wrap(Wrap { trim: true }), columns[0]);

    let previews = slide
        .previews
        .iter()
        .flat_map(|p| {
            let mut lines = vec![Line::from(Span::styled(
                truncate_name(&p.name, CARD_NAME_WIDTH),
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            if let Some(price) = &p.price {
                lines.push(Line::from(Span::styled(price.label(), accent_style())));
            }
            lines.push(Line::from(Span::styled(p.specs[0].clone(), dim_style())));
            lines.push(Line::default());
            lines
        })
        .collect::<Vec<_>>();
    f.render_widget(
        Paragraph::new(previews)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::LEFT).title(" Pro picks ")),
        columns[1],
    );
}

fn render_dots(app: &App, home: &HomeCarousels, f: &mut Frame, layout: &HomeLayout) {
    let current = home.hero.controller.current_index();
    let disabled = home.hero.controller.is_transitioning();
    for (i, rect) in layout.dot_rects(app.hero_slides.len()).into_iter().enumerate() {
        let (symbol, style) = if i == current {
            ("●", Style::default().fg(Color::Cyan))
        } else if disabled {
            ("○", dim_style())
        } else {
            ("○", Style::default())
        };
        f.render_widget(Paragraph::new(Span::styled(symbol, style)), rect);
    }
}

fn render_deals(app: &App, home: &HomeCarousels, f: &mut Frame, layout: &HomeLayout) {
    let hovered = home.deals.controller.is_hovered();
    let border = if hovered {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(border)
        .title(Span::styled(" Hot Deals ", title_style()))
        .title_alignment(Alignment::Center);
    f.render_widget(block, layout.deals);

    let arrow_row = |r: Rect| Rect {
        y: r.y + r.height / 2,
        height: 1.min(r.height),
        ..r
    };
    f.render_widget(
        Paragraph::new("◀").alignment(Alignment::Center),
        arrow_row(layout.deals_prev),
    );
    f.render_widget(
        Paragraph::new("▶").alignment(Alignment::Center),
        arrow_row(layout.deals_next),
    );

    let cards_area = Rect {
        y: layout.deals_cards.y + 1,
        height: layout.deals_cards.height.saturating_sub(1),
        ..layout.deals_cards
    };
    let cards = HomeLayout {
        deals_cards: cards_area,
        ..*layout
    }
    .deal_cards(home.deals_window.visible());

    for (product, rect) in app.visible_deals().into_iter().zip(cards) {
        render_deal_card(product, f, rect);
    }
}

fn render_deal_card(product: &Product, f: &mut Frame, area: Rect) {
    let name_width = (area.width.saturating_sub(2) as usize).min(CARD_NAME_WIDTH);
    let mut lines = vec![Line::from(Span::styled(
        truncate_name(&product.name.to_uppercase(), name_width.saturating_sub(3)),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(price) = &product.price {
        lines.push(Line::from(Span::styled(price.label(), accent_style())));
    }
    lines.push(Line::from(Span::styled(product.summary(), dim_style())));

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title_bottom(Span::styled(" Learn More › ", Style::default().fg(Color::Blue))),
        );
    f.render_widget(card, area);
}

fn render_footer(app: &App, f: &mut Frame, area: Rect) {
    let company = &app.catalog.company;
    let year = chrono::Local::now().year();
    let footer = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(
                "© {year} {}  ·  {}  ·  {}",
                company.name, company.phone, company.email
            ),
            dim_style(),
        )),
        Line::from(Span::styled(
            "←/→ slides  1-9 jump  [/] deals  enter explore  h hot deal  / search  q quit",
            dim_style(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(footer, area);
}
