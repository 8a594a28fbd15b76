pub mod chat;
pub mod constants;
pub mod error;
pub mod menu;
pub mod order;
pub mod selection;
pub mod web_server;

pub use chat::{ChatBridge, ChatConfig};
pub use error::ChatError;
pub use menu::MenuItem;
