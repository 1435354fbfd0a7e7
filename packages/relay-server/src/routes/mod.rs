// HTTP routes
pub mod claude;
pub mod health;

pub use claude::*;
pub use health::*;
