// Overheard: latent topic discovery for short social-media posts.
//
// This is the library root. Each module corresponds to one stage of the
// topic-discovery pipeline: corpus preparation, model training/scoring,
// the topic-count search, and report rendering.

pub mod config;
pub mod corpus;
pub mod error;
pub mod model;
pub mod output;
pub mod pipeline;

pub use error::{PipelineError, Result};
