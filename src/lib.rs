//! Developer tooling for the application's localization workflow:
//! extraction of `tr!`/`tr_plural!` strings into Fluent translation
//! files, plus regeneration of blurhash reference images for the media
//! test suite.

pub mod aggregate;
pub mod commands;
pub mod config;
pub mod extractor;
pub mod fs;
pub mod ftl;
pub mod keys;
pub mod logging;
pub mod placeholders;
pub mod pseudoloc;
pub mod scanner;
