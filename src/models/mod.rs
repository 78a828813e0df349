//! Typed rows and request bodies for the two resources.

pub mod company;
pub mod invoice;

pub use company::*;
pub use invoice::*;
