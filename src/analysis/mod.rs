pub mod consensus;
pub mod fallback;
pub mod gateway;
pub mod normalize;
pub mod session;
pub mod types;

// Re-export commonly used items
pub use consensus::{Consensus, consensus};
pub use gateway::{GatewayConfig, RemoteClient};
pub use normalize::normalize;
pub use session::Session;
pub use types::{AnalysisRequest, AnalysisResult, Sentiment};
