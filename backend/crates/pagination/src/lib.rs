//! Page request validation and listing metadata for Cinepulse endpoints.
//!
//! The crate is transport agnostic: inbound adapters parse raw query values
//! into a [`PageRequest`], persistence adapters translate it into
//! `LIMIT`/`OFFSET` clauses, and [`Metadata::compute`] summarises the result
//! for clients.

mod metadata;
mod request;

pub use metadata::Metadata;
pub use request::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE, MAX_PAGE_SIZE, PageRequest, PageRequestError,
};
