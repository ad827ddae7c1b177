pub mod artifacts;
pub mod classifier;
pub mod features;
pub mod pipeline;
pub mod polarity;
pub mod vectorizer;

pub use artifacts::load_artifacts;
pub use pipeline::SentimentPipeline;
