//! Redis-backed job queue.

pub mod consumer;
pub mod job;
pub mod producer;

pub use consumer::JobConsumer;
pub use job::{Job, JobPriority, JobStatus, JobType};
pub use producer::JobProducer;
