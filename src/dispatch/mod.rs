//! Dispatch of hook events to check pipelines.

mod dispatcher;
mod pipeline;

pub use dispatcher::Dispatcher;
pub use pipeline::{
    completion_pipeline, handles, per_edit_pipeline, Action, Check, Executor, Gate, Mode, Step,
};
