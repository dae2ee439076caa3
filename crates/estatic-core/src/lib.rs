//! Estatic Core Library
//!
//! Core types, configuration, and the content model for the Estatic
//! real-estate site generator.

pub mod config;
pub mod content;
pub mod error;
pub mod faq;
pub mod identity;

pub use config::Config;
pub use content::{HeroMedia, ProjectRecord, UnitPlan};
pub use error::{CoreError, Result};
pub use faq::{FaqItem, FaqTier, ResolvedFaqItem, merge_faqs};
pub use identity::{ProjectIdentity, resolve_identity};
