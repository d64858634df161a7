use anyhow::{Context, Result};
use tensorview::event_tracer::{
    RecordingTracer, UNSET_DEBUG_HANDLE, event_tracer_end_profiling_delegate,
    event_tracer_log_output_delegate, event_tracer_start_profiling_delegate,
};
use tensorview::{RuntimeConfig, ScalarType, TensorBuffers, TensorShapeDynamism, init_logging};

/* Output resizing under a fixed plan
    Buffers are planned once for the worst-case output shape (1x8x2x2, channels-last)
        Data storage is never reallocated, only sizes and strides are rewritten
    Each request resizes the same view in place and strides follow the planned dim order
        Requests above the planned element count are refused and leave the view unchanged
    Every resize is wrapped in delegate profiling hooks, successful ones also log the output tensor
        Set TENSORVIEW_EVENTS_JSONL to dump the recorded events
*/

fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("reading runtime config")?;
    init_logging(&config).context("initialising logging")?;

    let mut output = TensorBuffers::with_dim_order(
        ScalarType::Float,
        &[1, 8, 2, 2],
        &[0, 2, 3, 1],
        TensorShapeDynamism::DynamicBound,
    )
    .context("planning output buffers")?;

    let planned_bytes = output.capacity_bytes();
    let mut tracer = RecordingTracer::new();
    let mut view = output.view();

    println!("Planned output");
    println!("{:-<60}", "");
    println!(
        "sizes {:?}  strides {:?}  bound {} elements ({} bytes)",
        view.sizes(),
        view.strides(),
        view.numel_bound(),
        planned_bytes
    );
    println!("{:-<60}", "");

    let requests: [[i32; 4]; 4] = [[1, 4, 2, 2], [1, 8, 1, 2], [1, 2, 2, 2], [1, 8, 2, 3]];

    for (step, request) in requests.iter().enumerate() {
        let name = format!("resize_step_{}", step);
        let entry = event_tracer_start_profiling_delegate(
            Some(&mut tracer),
            Some(name.as_str()),
            UNSET_DEBUG_HANDLE,
        );
        let result = view.resize(request);
        event_tracer_end_profiling_delegate(Some(&mut tracer), entry, &[]);

        match result {
            Ok(()) => {
                println!(
                    "{:>2}: {:?} -> numel {:>3}, nbytes {:>4}, strides {:?}",
                    step,
                    request,
                    view.numel(),
                    view.nbytes(),
                    view.strides()
                );
                event_tracer_log_output_delegate(
                    Some(&mut tracer),
                    Some(name.as_str()),
                    UNSET_DEBUG_HANDLE,
                    &view,
                );
            }
            Err(e) => println!("{:>2}: {:?} refused: {}", step, request, e),
        }
    }

    println!("{:-<60}", "");
    println!("Recorded {} delegate events", tracer.events().len());

    if let Some(path) = &config.events_jsonl_path {
        tracer
            .export_jsonl(path)
            .with_context(|| format!("writing events to {}", path.display()))?;
        println!("Events written to {}", path.display());
    }

    Ok(())
}
