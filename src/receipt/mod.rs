pub mod types;

pub use types::{Item, Receipt};
