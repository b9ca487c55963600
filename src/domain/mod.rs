mod content;
mod stats;
mod user;

pub use content::*;
pub use stats::*;
pub use user::*;
