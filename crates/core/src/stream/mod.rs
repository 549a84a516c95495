//! Stream descriptors as produced by the upstream aggregator.
//!
//! This module holds the wire shape of a candidate stream, the parsed
//! stream request id, and the helpers that pull seeders and size out of
//! the free-text title lines.

mod request;
mod title_helper;
mod types;

pub use request::{ContentType, StreamRequest, StreamRequestError};
pub use title_helper::{extract_seeders, extract_size};
pub use types::*;
