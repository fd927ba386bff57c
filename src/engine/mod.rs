pub mod creative;
pub mod format;
pub mod framework;

pub use creative::{CreativePatterns, extract_concepts};
pub use format::{ExplorationResult, format_analysis, format_exploration};
pub use framework::{Analysis, FrameworkCore};
