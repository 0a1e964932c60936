//! Explainable scoring for care-facility assessments.
//!
//! Each assessment domain (placement fitment, fall risk, infection outbreak) runs the same
//! pipeline: a typed input record is normalized into the feature vector a fitted predictor
//! expects, the predictor's score is banded into a category, and deterministic rule tables turn
//! the raw input into human-readable factors and recommendations.

pub mod assessments;
pub mod config;
pub mod error;
pub mod predictor;
pub mod telemetry;
