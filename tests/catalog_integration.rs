use std::io::Write;

use assert_matches::assert_matches;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pumpdeck::app::App;
use pumpdeck::catalog::{Catalog, SortOrder};
use pumpdeck::clock::{Clock, ManualClock};
use pumpdeck::config::Config;
use pumpdeck::error::CatalogError;
use tempfile::NamedTempFile;

const SMALL_CATALOG: &str = r#"{
  "company": {
    "name": "Test Pumps",
    "tagline": "testing",
    "phone": "0",
    "email": "a@b.example",
    "website": "https://test.example"
  },
  "categories": [
    {
      "slug": "gear-pumps",
      "name": "Gear Pumps",
      "description": "Rotary gear pumps",
      "items": [
        { "id": "g1", "slug": "small-gear", "name": "Small Gear Pump" },
        {
          "id": "g2",
          "slug": "big-gear",
          "name": "Big Gear Pump",
          "description": "Cast iron body",
          "specifications": { "usage": "Lube oil transfer" }
        }
      ]
    }
  ]
}"#;

fn write_catalog(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn custom_catalog_loads_from_disk() {
    let file = write_catalog(SMALL_CATALOG);
    let catalog = Catalog::from_path(file.path()).unwrap();

    assert_eq!(catalog.company.name, "Test Pumps");
    assert_eq!(catalog.hot_deals().len(), 2);

    let slides = catalog.hero_slides();
    assert_eq!(slides.len(), 1);
    assert_eq!(
        slides[0].previews[1].specs,
        [
            "High Performance".to_string(),
            "Industrial Grade".to_string(),
            "Lube oil transfer".to_string()
        ]
    );
}

#[test]
fn search_over_custom_catalog_sorts_by_name() {
    let file = write_catalog(SMALL_CATALOG);
    let catalog = Catalog::from_path(file.path()).unwrap();

    let names: Vec<_> = catalog
        .search("GEAR", SortOrder::Descending)
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, ["Small Gear Pump", "Big Gear Pump"]);

    assert_eq!(catalog.search("cast iron", SortOrder::Ascending).len(), 1);
    assert!(catalog.search("diaphragm", SortOrder::Ascending).is_empty());
}

#[test]
fn rejects_catalogs_that_leave_carousels_empty() {
    let no_categories = write_catalog(
        r#"{"company":{"name":"x","tagline":"","phone":"","email":"","website":""},"categories":[]}"#,
    );
    assert_matches!(
        Catalog::from_path(no_categories.path()),
        Err(CatalogError::Empty("categories"))
    );

    let garbage = write_catalog("{ not json");
    assert_matches!(
        Catalog::from_path(garbage.path()),
        Err(CatalogError::Parse(_))
    );
}

#[test]
fn single_slide_carousels_never_move() {
    let clock = ManualClock::new();
    let file = write_catalog(SMALL_CATALOG);
    let catalog = Catalog::from_path(file.path()).unwrap();
    let mut app = App::new(catalog, Config::default(), clock.now()).unwrap();

    // two deals with four visible collapse to a single window position
    let home = app.home.as_ref().unwrap();
    assert_eq!(home.deals.controller.len(), 1);
    assert_eq!(home.deals_window.visible_range(0), 0..2);

    app.on_key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE), clock.now());
    clock.advance_ms(20_000);
    app.on_tick(clock.now());

    let home = app.home.as_ref().unwrap();
    assert_eq!(home.hero.controller.current_index(), 0);
    assert!(!home.hero.controller.is_paused());
    assert_eq!(home.deals.controller.current_index(), 0);
    assert_eq!(app.visible_deals().len(), 2);
}
