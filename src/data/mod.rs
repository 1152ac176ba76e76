//! Static datasets compiled into the application.
//!
//! - `pins`: labeled points of interest drawn above the land layer

pub mod pins;

pub use pins::{Pin, PINS};
