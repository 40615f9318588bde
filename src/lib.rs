pub mod config;
pub mod generator;
pub mod metadata;
pub mod verify;
