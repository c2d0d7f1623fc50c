// Resume review engine.
// Implements: section segmentation, chunking, per-section feedback/rewrite,
// role inference, ATS keyword matching, overall suggestions.
// All generation calls go through the TextGenerator trait — no direct API calls here.

pub mod chunker;
pub mod feedback;
pub mod handlers;
pub mod keywords;
pub mod pipeline;
pub mod prompts;
pub mod role;
pub mod sections;
pub mod suggestions;
