//! Shared utilities for the Bilby styling engine.

pub mod warning;
