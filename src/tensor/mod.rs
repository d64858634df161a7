mod buffers;
pub mod dim_order;
mod dynamism;
mod scalar_type;
mod tensor_impl;

pub use buffers::TensorBuffers;
pub use dynamism::TensorShapeDynamism;
pub use scalar_type::ScalarType;
pub use tensor_impl::TensorImpl;

/// Per-dimension extent.
pub type SizesType = i32;
/// Logical axis index inside a dim order.
pub type DimOrderType = u8;
/// Per-dimension stride, in elements.
pub type StridesType = i32;
