//! fairway_engine - Sheet range extraction, table normalization and annotation.

pub mod engine;
