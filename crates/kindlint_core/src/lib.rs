//! # kindlint_core
//!
//! Considerate-language lint engine for kindlint.
//!
//! This crate provides:
//! - The `Engine` that checks text against the built-in word lists
//! - Filetype profiles (plain text, Markdown, MDX, HTML)
//! - Settings loading from the editor or a workspace file
//!
//! ## Example
//!
//! ```rust,ignore
//! use kindlint_core::{Engine, Filetype, Settings};
//!
//! let engine = Engine::new(Settings::default())?;
//! let report = engine.check("Add it to the whitelist.", Filetype::PlainText.profile())?;
//! for message in &report.messages {
//!     println!("{}", message.reason);
//! }
//! ```

mod engine;
mod error;
mod filetype;
mod line_index;
mod message;
mod profile;
pub mod rules;
mod settings;

pub use engine::{Engine, Report};
pub use error::EngineError;
pub use filetype::Filetype;
pub use line_index::LineIndex;
pub use message::{Location, Message, Point};
pub use profile::Profile;
pub use settings::{ProfanitySureness, Settings, Strategy};
