#![deny(clippy::all, clippy::pedantic)]

pub mod auth;
pub mod cross_post;
pub mod newsletters;
pub mod posts;
pub mod types;
