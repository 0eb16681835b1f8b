mod opponent;
mod state;

pub use opponent::*;
pub use state::*;
