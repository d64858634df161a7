//! tensorview - Non-owning tensor views with in-place, allocation-free resizing
//!
//! A `TensorImpl` borrows the sizes, dim order, strides and data buffers a
//! memory planner laid out ahead of time, and lets kernels reshape their
//! outputs within the planned bound without ever reallocating.

#[macro_use]
mod utils;

pub mod event_tracer;

pub mod tensor;

pub use tensor::{
    DimOrderType, ScalarType, SizesType, StridesType, TensorBuffers, TensorImpl,
    TensorShapeDynamism,
};
pub use utils::config::RuntimeConfig;
pub use utils::error::{ConfigError, TensorError};
pub use utils::logging::init_logging;
