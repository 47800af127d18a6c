pub mod color;
pub mod error;
pub mod ids;

pub use color::Color;
pub use error::{ZoneError, ZoneResult};
pub use ids::ZoneId;
