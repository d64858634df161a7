//! In-memory tracer that keeps every delegate event for later export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::event_tracer::{
    DebugHandle, DelegateOutput, EventTracer, EventTracerEntry, Timestamp, UNSET_DEBUG_HANDLE,
};
use crate::tensor::{DimOrderType, ScalarType, SizesType, StridesType, TensorImpl};

/// Shape and layout of a logged tensor at the moment it was logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorRecord {
    pub scalar_type: ScalarType,
    pub sizes: Vec<SizesType>,
    pub dim_order: Vec<DimOrderType>,
    pub strides: Vec<StridesType>,
    pub nbytes: usize,
}

impl From<&TensorImpl<'_>> for TensorRecord {
    fn from(tensor: &TensorImpl<'_>) -> Self {
        Self {
            scalar_type: tensor.scalar_type(),
            sizes: tensor.sizes().to_vec(),
            dim_order: tensor.dim_order().to_vec(),
            strides: tensor.strides().to_vec(),
            nbytes: tensor.nbytes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OutputRecord {
    Int(i32),
    Bool(bool),
    Double(f64),
    Tensor(TensorRecord),
    TensorList(Vec<TensorRecord>),
}

impl From<&DelegateOutput<'_>> for OutputRecord {
    fn from(output: &DelegateOutput<'_>) -> Self {
        match *output {
            DelegateOutput::Int(v) => OutputRecord::Int(v),
            DelegateOutput::Bool(v) => OutputRecord::Bool(v),
            DelegateOutput::Double(v) => OutputRecord::Double(v),
            DelegateOutput::Tensor(t) => OutputRecord::Tensor(t.into()),
            DelegateOutput::TensorList(ts) => {
                OutputRecord::TensorList(ts.iter().map(TensorRecord::from).collect())
            }
        }
    }
}

/// A recorded delegate event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DelegateEvent {
    Profile {
        name: Option<String>,
        delegate_debug_id: DebugHandle,
        start_time: Timestamp,
        end_time: Timestamp,
        metadata: Vec<u8>,
    },
    Output {
        name: Option<String>,
        delegate_debug_id: DebugHandle,
        output: OutputRecord,
    },
}

/// Tracer that timestamps events against its own creation time and keeps
/// them in memory.
#[derive(Debug)]
pub struct RecordingTracer {
    clock: Instant,
    // 0 is reserved for the entry handed out when no tracer is active
    next_event_id: u64,
    pending: Vec<(u64, Option<String>)>,
    events: Vec<DelegateEvent>,
}

impl Default for RecordingTracer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingTracer {
    pub fn new() -> Self {
        Self {
            clock: Instant::now(),
            next_event_id: 1,
            pending: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.elapsed().as_nanos() as Timestamp
    }

    pub fn events(&self) -> &[DelegateEvent] {
        &self.events
    }

    /// Number of profiling events started but not yet ended.
    pub fn open_events(&self) -> usize {
        self.pending.len()
    }

    pub fn take_events(&mut self) -> Vec<DelegateEvent> {
        std::mem::take(&mut self.events)
    }

    /// Write one JSON object per event.
    pub fn write_jsonl<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for event in &self.events {
            serde_json::to_writer(&mut writer, event)?;
            writeln!(writer)?;
        }
        writer.flush()
    }

    pub fn export_jsonl<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        self.write_jsonl(BufWriter::new(file))
    }

    fn record(&mut self, event: DelegateEvent) {
        tracing::trace!(target: "event_tracer", ?event, "recorded delegate event");
        self.events.push(event);
    }
}

// Post-processing links events back to the graph by name or by debug id,
// never both.
fn warn_on_ambiguous_identity(name: Option<&str>, delegate_debug_id: DebugHandle) {
    if name.is_some() == (delegate_debug_id != UNSET_DEBUG_HANDLE) {
        tracing::warn!(
            target: "event_tracer",
            ?name,
            delegate_debug_id,
            "delegate events should be identified by exactly one of name or debug id"
        );
    }
}

impl EventTracer for RecordingTracer {
    fn start_profiling_delegate(
        &mut self,
        name: Option<&str>,
        delegate_debug_id: DebugHandle,
    ) -> EventTracerEntry {
        warn_on_ambiguous_identity(name, delegate_debug_id);
        let event_id = self.next_event_id;
        self.next_event_id += 1;
        self.pending.push((event_id, name.map(str::to_owned)));
        EventTracerEntry {
            event_id,
            delegate_debug_id,
            start_time: self.now(),
        }
    }

    fn end_profiling_delegate(&mut self, entry: EventTracerEntry, metadata: &[u8]) {
        let end_time = self.now();
        let Some(idx) = self.pending.iter().position(|(id, _)| *id == entry.event_id) else {
            tracing::warn!(
                target: "event_tracer",
                event_id = entry.event_id,
                "ending a delegate event that was never started"
            );
            return;
        };
        let (_, name) = self.pending.swap_remove(idx);
        self.record(DelegateEvent::Profile {
            name,
            delegate_debug_id: entry.delegate_debug_id,
            start_time: entry.start_time,
            end_time,
            metadata: metadata.to_vec(),
        });
    }

    fn log_profiling_delegate(
        &mut self,
        name: Option<&str>,
        delegate_debug_id: DebugHandle,
        start_time: Timestamp,
        end_time: Timestamp,
        metadata: &[u8],
    ) {
        warn_on_ambiguous_identity(name, delegate_debug_id);
        self.record(DelegateEvent::Profile {
            name: name.map(str::to_owned),
            delegate_debug_id,
            start_time,
            end_time,
            metadata: metadata.to_vec(),
        });
    }

    fn log_intermediate_output_delegate(
        &mut self,
        name: Option<&str>,
        delegate_debug_id: DebugHandle,
        output: &DelegateOutput<'_>,
    ) {
        warn_on_ambiguous_identity(name, delegate_debug_id);
        tracing::trace!(
            target: "event_tracer",
            kind = output.kind(),
            "snapshotting delegate output"
        );
        self.record(DelegateEvent::Output {
            name: name.map(str::to_owned),
            delegate_debug_id,
            output: output.into(),
        });
    }
}
