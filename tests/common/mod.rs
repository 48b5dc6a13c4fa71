//! Common test utilities shared across integration tests


pub use fixture::{BASE_TIME, TestFixture};
