// Library for tests to access modules

pub mod analyzer;
pub mod cli;
pub mod cloud;
pub mod collector;
pub mod config;
pub mod fleet;
pub mod models;
pub mod store;
pub mod summary;
