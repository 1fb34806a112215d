//! Query modules for DeckDex.
//!
//! Each module provides a query struct that borrows a [`Connection`](crate::connection::Connection)
//! and exposes methods returning typed `Result<T>` rows.

pub mod cards;
pub mod decks;

pub use cards::{CardFilter, CardQuery, Pagination};
pub use decks::DeckQuery;
