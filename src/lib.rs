//! intlint - i18n usage validation for JSX projects
//!
//! intlint is a CLI tool and library that validates internationalization
//! usage inside JSX/TSX markup: every referenced translation key must exist
//! in every configured language dictionary, agree in pluralization shape,
//! supply template field data exactly when the translation needs it, and no
//! raw untranslated text may appear where a translated component belongs.
//!
//! ## Module Structure
//!
//! - `cli`: command-line interface layer (arguments, dispatch, reporting)
//! - `config`: configuration file loading and compiled settings
//! - `dictionary`: translation dictionary store with TTL caching and
//!   scoped key-path resolution
//! - `engine`: the validation engine (classification, extraction,
//!   pluralization, template fields, disallowed text)
//! - `findings`: finding type definitions and report dispatch
//! - `markup`: the markup node model and its JSX/TSX frontend
//! - `scan`: source file discovery and parallel parsing

pub mod cli;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod findings;
pub mod markup;
pub mod scan;
