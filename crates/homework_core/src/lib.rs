//! Homework core: pure poll/validate/detect/notify state machine.
mod classify;
mod detect;
mod effect;
mod msg;
mod record;
mod state;
mod translate;
mod update;
mod validate;

pub use classify::{
    classify, ClassifiedError, Disposition, ErrorKind, PipelineError, Severity, TransportFailure,
};
pub use detect::has_changed;
pub use effect::Effect;
pub use msg::{Msg, NotifyOutcome};
pub use record::{ApiResponse, HomeworkRecord, HomeworkStatus};
pub use state::PollState;
pub use translate::translate;
pub use update::update;
pub use validate::{validate, SchemaError};
