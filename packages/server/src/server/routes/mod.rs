// HTTP routes
pub mod chat;
pub mod extract;
pub mod health;
pub mod root;

pub use chat::*;
pub use extract::*;
pub use health::*;
pub use root::*;
