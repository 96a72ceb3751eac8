pub mod calculator;
pub mod config;
pub mod error;
pub mod etuovi;
pub mod export;
pub mod logger;
pub mod models;
pub mod web;
