//! Profiling and debug hooks for delegate backends.
//!
//! Backends wrap their work in the `event_tracer_*` hooks. The tensor core
//! never calls into this module itself.

mod hooks;
mod output;
mod recorder;
mod tracer;

pub use hooks::{
    event_tracer_end_profiling_delegate, event_tracer_log_output_delegate,
    event_tracer_log_profiling_delegate, event_tracer_start_profiling_delegate,
};
pub use output::DelegateOutput;
pub use recorder::{DelegateEvent, OutputRecord, RecordingTracer, TensorRecord};
pub use tracer::{
    DebugHandle, EventTracer, EventTracerEntry, NullTracer, Timestamp, UNSET_DEBUG_HANDLE,
};
