//! The messages exchanged between the producers and consumers of huddle.

pub mod events;
pub mod topics;

pub use events::*;
pub use topics::Topic;
