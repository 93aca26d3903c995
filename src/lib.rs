pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod sink;
pub mod source;
pub mod verify;

pub use config::ScrubConfig;
pub use error::{Result, ScrubError};
pub use pipeline::{Pipeline, PipelineOutcome};
pub use record::{RecordSet, Value};
pub use verify::{CheckOutcome, VerificationReport};
