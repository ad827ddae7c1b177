pub mod expectation;
pub mod models;
pub mod performance;
pub mod rounds;
pub mod sentiment;
pub mod verdict;

pub use models::{BiasVerdict, SentimentLabel, TourAverages, TournamentStats};
pub use sentiment::SentimentResultSet;
pub use verdict::score_bias;
