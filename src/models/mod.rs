mod message;
mod request;

pub use message::{ChatMessage, Role};
pub use request::ChatRequest;
