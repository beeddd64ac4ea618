pub mod catalog;
pub mod config;
pub mod demand;
pub mod selection;
pub mod steps;
pub mod storage;
pub mod store;
