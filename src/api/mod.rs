pub mod client;
pub mod error;
pub mod types;

pub use client::{GenerationApi, GenerationClient};
pub use error::ApiError;
pub use types::{CreateGenerationRequest, GenerationKind, GenerationRecord, GenerationStatus};
