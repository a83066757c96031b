pub mod average;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod report;
