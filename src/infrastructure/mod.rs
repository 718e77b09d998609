// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_catalog;
pub mod http_generation;
