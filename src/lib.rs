pub mod chat;
pub mod classifier;
pub mod config;
pub mod credibility;
pub mod format;
pub mod gemini;
pub mod models;
pub mod server;

pub use config::AppConfig;
pub use format::{format_analysis, FormattingResult};
pub use server::{build_router, run_server, AppState};
