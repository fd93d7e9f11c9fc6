//! API endpoint handlers.
//!
//! Handlers stay thin: validation and response shaping here, inference in
//! `crate::inference`.

pub mod health;
pub mod symptoms;
