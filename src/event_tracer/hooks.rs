//! Hooks delegate backends call around their own execution.
//!
//! Every hook takes an optional tracer so callers never branch on whether
//! one was supplied. With the `event-tracer` feature off the bodies compile
//! to nothing and the arguments are discarded.

use crate::event_tracer::{DebugHandle, DelegateOutput, EventTracer, EventTracerEntry, Timestamp};

/// Start a delegate profiling event and return the token that ends it.
pub fn event_tracer_start_profiling_delegate(
    event_tracer: Option<&mut dyn EventTracer>,
    name: Option<&str>,
    delegate_debug_id: DebugHandle,
) -> EventTracerEntry {
    #[cfg(feature = "event-tracer")]
    {
        if let Some(tracer) = event_tracer {
            return tracer.start_profiling_delegate(name, delegate_debug_id);
        }
    }
    #[cfg(not(feature = "event-tracer"))]
    {
        let _ = (event_tracer, name, delegate_debug_id);
    }
    EventTracerEntry::default()
}

/// End the event started by `event_tracer_start_profiling_delegate`,
/// attaching opaque `metadata` the tracer passes through untouched.
pub fn event_tracer_end_profiling_delegate(
    event_tracer: Option<&mut dyn EventTracer>,
    entry: EventTracerEntry,
    metadata: &[u8],
) {
    #[cfg(feature = "event-tracer")]
    {
        if let Some(tracer) = event_tracer {
            tracer.end_profiling_delegate(entry, metadata);
        }
    }
    #[cfg(not(feature = "event-tracer"))]
    {
        let _ = (event_tracer, entry, metadata);
    }
}

/// Log an event the delegate timed itself.
pub fn event_tracer_log_profiling_delegate(
    event_tracer: Option<&mut dyn EventTracer>,
    name: Option<&str>,
    delegate_debug_id: DebugHandle,
    start_time: Timestamp,
    end_time: Timestamp,
    metadata: &[u8],
) {
    #[cfg(feature = "event-tracer")]
    {
        if let Some(tracer) = event_tracer {
            tracer.log_profiling_delegate(name, delegate_debug_id, start_time, end_time, metadata);
        }
    }
    #[cfg(not(feature = "event-tracer"))]
    {
        let _ = (event_tracer, name, delegate_debug_id, start_time, end_time, metadata);
    }
}

/// Log an intermediate output. Accepts `i32`, `bool`, `f64`, `&TensorImpl`
/// and `&[TensorImpl]`.
pub fn event_tracer_log_output_delegate<'o, T>(
    event_tracer: Option<&mut dyn EventTracer>,
    name: Option<&str>,
    delegate_debug_id: DebugHandle,
    output: T,
) where
    T: Into<DelegateOutput<'o>>,
{
    #[cfg(feature = "event-tracer")]
    {
        if let Some(tracer) = event_tracer {
            tracer.log_intermediate_output_delegate(name, delegate_debug_id, &output.into());
        }
    }
    #[cfg(not(feature = "event-tracer"))]
    {
        let _ = (event_tracer, name, delegate_debug_id, output);
    }
}
