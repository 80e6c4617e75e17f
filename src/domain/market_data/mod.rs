//! Market data delivered by the analytics service: candles, close series and
//! the trade recommendation contract.

pub mod entities;
pub mod recommendation;
pub mod value_objects;

pub use entities::*;
pub use recommendation::*;
pub use value_objects::*;
