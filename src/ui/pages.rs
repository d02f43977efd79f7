use itertools::Itertools;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::App;
use crate::catalog::{truncate_name, Product, CARD_NAME_WIDTH};
use crate::ui::{accent_style, dim_style, title_style};

fn page_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(0),    // body
            Constraint::Length(1), // key hints
        ])
        .split(area)
}

fn render_title(f: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let widget = Paragraph::new(vec![
        Line::from(Span::styled(title.to_string(), title_style())),
        Line::from(Span::styled(subtitle.to_string(), dim_style())),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(widget, area);
}

fn render_hints(f: &mut Frame, area: Rect, hints: &str) {
    f.render_widget(
        Paragraph::new(Span::styled(hints.to_string(), dim_style())).alignment(Alignment::Center),
        area,
    );
}

/// Selectable product rows. The selected row is reversed.
fn product_rows(products: &[&Product], selected: usize) -> Vec<Line<'static>> {
    products
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let marker = if i == selected { "›" } else { " " };
            let style = if i == selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            let price = p.price.as_ref().map(|pr| pr.label()).unwrap_or_default();
            let name = truncate_name(&p.name, CARD_NAME_WIDTH);
            Line::from(vec![
                Span::styled(
                    format!("{marker} {name:<width$}", width = CARD_NAME_WIDTH + 3),
                    style,
                ),
                Span::styled(format!("  {price}"), accent_style()),
            ])
        })
        .collect()
}

pub fn render_category(app: &App, slug: &str, f: &mut Frame) {
    let chunks = page_chunks(f.area());
    let Some(category) = app.catalog.find_category(slug) else {
        render_title(f, chunks[0], "Category not found", slug);
        render_hints(f, chunks[2], "esc back");
        return;
    };

    render_title(f, chunks[0], &category.name, &category.description);

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(chunks[1]);
    f.render_widget(
        Paragraph::new(format!(
            "Explore our range of {} ({} products)",
            category.name.to_lowercase(),
            category.items.len()
        )),
        body[0],
    );

    let products: Vec<&Product> = category.items.iter().collect();
    f.render_widget(
        Paragraph::new(product_rows(&products, app.category_list.selected)),
        body[1],
    );
    render_hints(f, chunks[2], "↑/↓ select  enter details  esc back");
}

pub fn render_detail(app: &App, slug: &str, f: &mut Frame) {
    let chunks = page_chunks(f.area());
    let Some(product) = app.catalog.find_product(slug) else {
        render_title(f, chunks[0], "Product not found", slug);
        render_hints(f, chunks[2], "esc back");
        return;
    };

    let category = app
        .catalog
        .category_of(slug)
        .map(|c| c.name.as_str())
        .unwrap_or_default();
    render_title(f, chunks[0], &product.name, category);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let mut overview = vec![Line::from(product.summary()), Line::default()];
    if let Some(price) = &product.price {
        overview.push(Line::from(vec![
            Span::styled("Price: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(price.label(), accent_style()),
        ]));
        overview.push(Line::default());
    }
    if !product.features.is_empty() {
        overview.push(Line::from(Span::styled(
            "Features",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        overview.extend(product.features.iter().map(|feat| Line::from(format!("• {feat}"))));
        overview.push(Line::default());
    }
    if !product.applications.is_empty() {
        overview.push(Line::from(vec![
            Span::styled("Applications: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(product.applications.iter().join(", ")),
        ]));
    }
    f.render_widget(
        Paragraph::new(overview)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Overview ")),
        body[0],
    );

    let rows = product.specifications.iter().map(|(key, value)| {
        Row::new(vec![
            Cell::from(key.replace('_', " ")).style(dim_style()),
            Cell::from(value.clone()),
        ])
    });
    let table = Table::new(rows, [Constraint::Length(14), Constraint::Min(10)])
        .header(
            Row::new(vec!["Specification", "Value"])
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(" Specifications "));
    f.render_widget(table, body[1]);

    render_hints(f, chunks[2], "o open in browser  esc back");
}

pub fn render_search(app: &App, f: &mut Frame) {
    let chunks = page_chunks(f.area());
    let results = app.search_results();

    let input = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Search: ", title_style()),
            Span::raw(app.search.term.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::from(Span::styled(
            format!("{} products ({})", results.len(), app.search.order),
            dim_style(),
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(input, chunks[0]);

    if results.is_empty() {
        f.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled("No products found", accent_style())),
                Line::from(Span::styled(
                    "Try adjusting your search terms to find what you're looking for.",
                    dim_style(),
                )),
            ])
            .alignment(Alignment::Center),
            chunks[1],
        );
    } else {
        f.render_widget(
            Paragraph::new(product_rows(&results, app.search.list.selected)),
            chunks[1],
        );
    }

    render_hints(f, chunks[2], "type to filter  tab sort  ↑/↓ select  enter details  esc back");
}
