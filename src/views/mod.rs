pub mod challenge;
pub mod chat;
pub mod layout;
pub mod quiz;

pub use layout::{page, render};
