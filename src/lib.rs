pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod openapi;
pub mod render;
pub mod report;
pub mod routes;
pub mod state;

#[cfg(test)]
pub mod test_support;
