//! Streaming integration tests
