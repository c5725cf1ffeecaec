pub mod app_module;
pub mod app_router;
pub mod config;
pub mod error;
pub mod generation;
pub mod health;

pub use app_module::AppState;
pub use config::{ApiDialect, CredentialSource, GatewayConfig};
pub use error::{ConfigError, GatewayError};
pub use generation::generation_service::{GatewayRequest, GatewayResponse, GenerationService};
pub use generation::in_process::InProcessService;
pub use generation::instruction::PromptInstruction;
pub use generation::upstream::UpstreamProvider;
