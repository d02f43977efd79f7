// Library surface for headless/integration tests and reuse.
pub mod app;
pub mod carousel;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod transition;
pub mod ui;
