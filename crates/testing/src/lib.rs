//! Testing utilities for the CV-Screen platform.
//!
//! This crate provides shared test infrastructure:
//! - **builders**: fluent builders for domain entities
//! - **fixtures**: sample jobs, CV texts, and canned model replies
//! - **mocks**: in-memory repository ports, a scripted model port, and an
//!   event recorder

pub mod builders;
pub mod fixtures;
pub mod mocks;

pub use builders::{CandidateBuilder, JobBuilder, ShortlistEntryBuilder};
pub use mocks::{
    InMemoryCandidateRepository, InMemoryJobRepository, InMemoryShortlistRepository,
    MockEventPublisher, MockLlm,
};
