//! Storage for the service layer.
//!
//! A single JSON file holds the whole term collection; `TermStore` is its
//! only reader and writer.

pub mod term_store;
