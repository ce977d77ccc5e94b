//! examsheet-core — Exam model, validation, and grading.
//!
//! This crate defines the exam data model, the answer-key parser and
//! validator, and the grading engine that the rest of examsheet builds on.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod results;
pub mod session;
pub mod validation;
