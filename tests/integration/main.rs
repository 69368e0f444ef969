//! Integration tests for the keeper core.
//!
//! All tests run against deterministic in-memory collaborators defined
//! in `mock_chain`, with no network access and no real contracts.


mod authorizations;
mod pipeline;
