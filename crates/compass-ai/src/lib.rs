pub mod analyzer;
pub mod models;
pub mod prompt;
pub mod providers;

pub use analyzer::PositioningAnalyzer;
pub use providers::openai::OpenAiProvider;
