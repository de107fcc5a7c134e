mod cache;
mod range;
mod record;

pub use cache::*;
pub use range::*;
pub use record::*;
