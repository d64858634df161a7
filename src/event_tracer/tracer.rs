use serde::{Deserialize, Serialize};

use crate::event_tracer::DelegateOutput;

/// Identifier a delegate assigns to an operation in its lowered graph.
pub type DebugHandle = u32;

/// Passed as the debug handle when a delegate identifies events by name.
pub const UNSET_DEBUG_HANDLE: DebugHandle = DebugHandle::MAX;

/// Nanoseconds on the tracer's clock.
pub type Timestamp = u64;

/// Token returned when a delegate profiling event starts and handed back
/// when it ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTracerEntry {
    pub event_id: u64,
    pub delegate_debug_id: DebugHandle,
    pub start_time: Timestamp,
}

impl Default for EventTracerEntry {
    // Handed out when there is no active tracer; ending it is a no-op.
    fn default() -> Self {
        Self {
            event_id: 0,
            delegate_debug_id: UNSET_DEBUG_HANDLE,
            start_time: 0,
        }
    }
}

/// Sink for profiling and debug events emitted by delegate backends.
///
/// `name` and `delegate_debug_id` identify the event: delegates that use
/// names pass `UNSET_DEBUG_HANDLE`, delegates that use indices pass `None`.
/// Names are borrowed for the call only; implementations copy what they keep.
pub trait EventTracer {
    fn start_profiling_delegate(
        &mut self,
        name: Option<&str>,
        delegate_debug_id: DebugHandle,
    ) -> EventTracerEntry;

    fn end_profiling_delegate(&mut self, entry: EventTracerEntry, metadata: &[u8]);

    /// Record an event whose timing was gathered by the delegate itself,
    /// e.g. after the whole graph ran.
    fn log_profiling_delegate(
        &mut self,
        name: Option<&str>,
        delegate_debug_id: DebugHandle,
        start_time: Timestamp,
        end_time: Timestamp,
        metadata: &[u8],
    );

    fn log_intermediate_output_delegate(
        &mut self,
        name: Option<&str>,
        delegate_debug_id: DebugHandle,
        output: &DelegateOutput<'_>,
    );
}

/// Tracer that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTracer;

impl EventTracer for NullTracer {
    #[inline]
    fn start_profiling_delegate(&mut self, _: Option<&str>, _: DebugHandle) -> EventTracerEntry {
        EventTracerEntry::default()
    }

    #[inline]
    fn end_profiling_delegate(&mut self, _: EventTracerEntry, _: &[u8]) {}

    #[inline]
    fn log_profiling_delegate(
        &mut self,
        _: Option<&str>,
        _: DebugHandle,
        _: Timestamp,
        _: Timestamp,
        _: &[u8],
    ) {
    }

    #[inline]
    fn log_intermediate_output_delegate(
        &mut self,
        _: Option<&str>,
        _: DebugHandle,
        _: &DelegateOutput<'_>,
    ) {
    }
}
