pub mod config;
pub mod entities;
pub mod interaction;
pub mod levels;
pub mod value_objects;

pub use config::*;
pub use entities::*;
pub use interaction::*;
pub use levels::*;
pub use value_objects::*;
