pub mod categorical;
pub use categorical::*;
