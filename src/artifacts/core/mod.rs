//! Core utilities and shared types
//!
//! This module contains types shared across the engine, most importantly the
//! crate-wide error type.

pub mod error;
