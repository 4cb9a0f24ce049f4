//! Meal Statistics Library
//!
//! Nutrition statistics and gamification engine for logged meals, with
//! SQLite storage and an MCP tool surface.

pub mod build_info;
pub mod db;
pub mod mcp;
pub mod models;
pub mod stats;
pub mod tools;
