//! Provider boundaries.

pub mod model;
pub mod web;
