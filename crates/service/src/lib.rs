//! Glossary domain layer.
//! - `storage::term_store` owns the term collection and its JSON file.
//! - `glossary` exposes the RPC-level use cases on top of the store.
//! - `rpc` holds the wire messages shared by the server and its clients.

pub mod errors;
pub mod model;
pub mod storage;
pub mod graph;
pub mod pagination;
pub mod rpc;
pub mod api;
pub mod glossary;

pub use errors::ServiceError;
pub use glossary::GlossaryService;
pub use model::Term;
pub use storage::term_store::TermStore;
