// src/specs/mod.rs
//! Page-specific scraping specifications.
//!
//! A spec knows *where the ground truth lives in the HTML* for one kind
//! of page and how to extract it tolerantly: case-insensitive tag
//! scanning, local scanning within known blocks, entity/whitespace
//! normalization. Fetching, caching and normalization live in other
//! layers; specs only read markup. Everything here is testable offline
//! against captured fixtures.

pub mod compat;
