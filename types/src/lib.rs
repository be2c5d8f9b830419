mod types;
mod utils;

pub use types::*;
pub use utils::slugify;
