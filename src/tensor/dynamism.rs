use serde::{Deserialize, Serialize};

/// Resizing discipline of a tensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TensorShapeDynamism {
    /// Shape is fixed when the program is planned; resize only validates.
    Static,
    /// Shape may change as long as the element count stays within the
    /// count the tensor was built with.
    DynamicBound,
    /// Intended to allow growth past the planned bound. Growing requires
    /// reallocation, which the view cannot do, so it is bounded the same
    /// way as `DynamicBound` for now.
    DynamicUnbound,
}

impl TensorShapeDynamism {
    pub fn is_dynamic(self) -> bool {
        !matches!(self, TensorShapeDynamism::Static)
    }
}
