pub mod rendering;
pub mod services;

pub use rendering::*;
pub use services::{BrowserTimeProvider, ConsoleLogger};
