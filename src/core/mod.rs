pub mod config;
pub mod context;
pub mod manifest;
pub mod project;
pub mod registry;
pub mod sim;
pub mod toolchain;
