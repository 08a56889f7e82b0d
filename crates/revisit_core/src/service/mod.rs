//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and persistence into use-case level APIs.
//! - Keep front ends decoupled from storage details.

pub mod review_service;
