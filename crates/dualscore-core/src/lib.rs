//! dualscore-core — Scoring, ranking, and fairness-comparison engine.
//!
//! This crate defines the applicant data model, the blind and aware scoring
//! models, and the pipeline that compares their decisions, rankings, and
//! group-level admit rates.

pub mod compare;
pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod fairness;
pub mod model;
pub mod parser;
pub mod ranking;
pub mod report;
pub mod scoring;
pub mod statistics;
