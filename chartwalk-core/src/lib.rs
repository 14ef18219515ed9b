pub mod config;
pub mod fetcher;
pub mod model;
pub mod page;
pub mod reducer;
pub mod state;
