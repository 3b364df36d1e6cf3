//! Generation-chaining pipeline.
//!
//! Drives one clip's full lifecycle (validate, submit, poll, download,
//! extract continuity frame) and combines finished clips into a single
//! artifact. State lives in an explicit [`PipelineSession`] passed into
//! every call; there are no process globals, so independent sessions can
//! run side by side as long as each owns its own workspace.

pub mod config;
pub mod continuity;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod script;
pub mod session;
pub mod workspace;

pub use config::PipelineConfig;
pub use continuity::ContinuityState;
pub use controller::PipelineController;
pub use error::{PipelineError, PipelineResult};
pub use gateway::MediaGateway;
pub use session::PipelineSession;
pub use workspace::ProjectWorkspace;
