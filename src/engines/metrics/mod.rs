pub mod descriptive;

pub use descriptive::{max, mean, min, std_dev};
