//! Sensor dashboard - web front end of a home sensor monitoring system
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod entity;
pub mod error;
pub mod routes;
pub mod services;
pub mod store;
pub mod views;
