pub mod env;
mod loader;

pub use env::{AnalysisConfig, AppConfig, ChartConfig, DirectoryConfig, FetchConfig};
pub use loader::load_config;
