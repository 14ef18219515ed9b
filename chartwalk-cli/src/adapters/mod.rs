//! Fetcher implementations for external package tools

mod helm;

pub use helm::HelmCli;
