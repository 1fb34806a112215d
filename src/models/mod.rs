pub mod card;
pub mod deck;
pub mod scryfall;

pub use card::*;
pub use deck::*;
pub use scryfall::*;
