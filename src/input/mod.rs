pub mod handler;

pub use handler::{InputCommand, InputHandler};
