//! Shared utilities and common types for the Villa Araçá planner.
//!
//! This crate provides functionality used across all other crates:
//! - Calendar month arithmetic (`MonthKey`)
//! - BRL currency and date formatting
//! - Translation tables with typed keys
//! - Common validation logic

pub mod format;
pub mod i18n;
pub mod month;
pub mod validation;

pub use i18n::{Language, TranslationKey, Translator};
pub use month::{MonthKey, MonthKeyError};
