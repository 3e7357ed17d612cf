//! Queries against the three stores. Every function takes the connection of
//! the store it reads, so callers decide which database is used.

pub mod logs;
pub mod scripts;
pub mod sensors;
