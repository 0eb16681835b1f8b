/// Chess domain types.
pub mod chess;
/// Rule-free chess against a random opponent.
pub mod freeplay;
/// Rule-checked chess against an engine.
pub mod session;
