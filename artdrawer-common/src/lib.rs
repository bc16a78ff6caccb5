//! # ArtDrawer Common Library
//!
//! Shared code for the ArtDrawer services:
//! - Artist, artwork and drawer models
//! - Common error type
//! - Bootstrap configuration and root folder resolution
//! - Stable artist id derivation
//! - Time and UUID helpers

pub mod config;
pub mod error;
pub mod models;
pub mod slug;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
pub use models::{Artist, Artwork, Bilingual, Category, CollectionItem, Identity, Link};
