mod card;

pub use card::CardRow;
