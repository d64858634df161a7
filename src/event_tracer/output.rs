use crate::tensor::TensorImpl;

/// Values a delegate may log as an intermediate output.
///
/// The set is closed: only the `From` impls below exist, so the hook's
/// `Into<DelegateOutput>` bound rejects any other type at compile time.
#[derive(Debug, Clone, Copy)]
pub enum DelegateOutput<'a> {
    Int(i32),
    Bool(bool),
    Double(f64),
    Tensor(&'a TensorImpl<'a>),
    TensorList(&'a [TensorImpl<'a>]),
}

impl DelegateOutput<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            DelegateOutput::Int(_) => "int",
            DelegateOutput::Bool(_) => "bool",
            DelegateOutput::Double(_) => "double",
            DelegateOutput::Tensor(_) => "tensor",
            DelegateOutput::TensorList(_) => "tensor_list",
        }
    }
}

impl From<i32> for DelegateOutput<'_> {
    fn from(value: i32) -> Self {
        DelegateOutput::Int(value)
    }
}

impl From<bool> for DelegateOutput<'_> {
    fn from(value: bool) -> Self {
        DelegateOutput::Bool(value)
    }
}

impl From<f64> for DelegateOutput<'_> {
    fn from(value: f64) -> Self {
        DelegateOutput::Double(value)
    }
}

impl<'o, 't: 'o> From<&'o TensorImpl<'t>> for DelegateOutput<'o> {
    fn from(tensor: &'o TensorImpl<'t>) -> Self {
        DelegateOutput::Tensor(tensor)
    }
}

impl<'o, 't: 'o> From<&'o [TensorImpl<'t>]> for DelegateOutput<'o> {
    fn from(tensors: &'o [TensorImpl<'t>]) -> Self {
        DelegateOutput::TensorList(tensors)
    }
}
