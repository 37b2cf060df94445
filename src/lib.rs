pub mod config;
pub mod errors;
pub mod generator;
pub mod models;
pub mod parser;
pub mod services;
pub mod sources;
pub mod utils;
pub mod web;
