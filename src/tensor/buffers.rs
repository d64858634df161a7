use crate::tensor::{
    DimOrderType, ScalarType, SizesType, StridesType, TensorImpl, TensorShapeDynamism,
    dim_order::dim_order_to_stride,
};
use crate::utils::error::TensorError;

/// Owning set of buffers a `TensorImpl` can be laid over.
///
/// Plays the memory planner for callers that have no arena of their own:
/// storage is sized for the shape given here, which is the bound for every
/// view taken from it.
#[derive(Clone, Debug)]
pub struct TensorBuffers {
    scalar_type: ScalarType,
    shape_dynamism: TensorShapeDynamism,
    planned_sizes: Vec<SizesType>,
    planned_strides: Vec<StridesType>,
    // scratch the current view resizes in place
    sizes: Vec<SizesType>,
    dim_order: Vec<DimOrderType>,
    strides: Vec<StridesType>,
    data: Vec<u8>,
}

impl TensorBuffers {
    /// Contiguous (row-major) buffers for `sizes`.
    pub fn new(
        scalar_type: ScalarType,
        sizes: &[SizesType],
        shape_dynamism: TensorShapeDynamism,
    ) -> Result<Self, TensorError> {
        let dim_order: Vec<DimOrderType> = (0..sizes.len()).map(|d| d as DimOrderType).collect();
        Self::with_dim_order(scalar_type, sizes, &dim_order, shape_dynamism)
    }

    pub fn with_dim_order(
        scalar_type: ScalarType,
        sizes: &[SizesType],
        dim_order: &[DimOrderType],
        shape_dynamism: TensorShapeDynamism,
    ) -> Result<Self, TensorError> {
        if !scalar_type.is_valid() {
            return Err(TensorError::InvalidArgument(format!(
                "Cannot plan buffers for scalar type {}",
                scalar_type
            )));
        }
        if dim_order.len() != sizes.len() {
            return Err(TensorError::InvalidArgument(format!(
                "Dim order {:?} does not match rank {}",
                dim_order,
                sizes.len()
            )));
        }

        let mut strides = vec![0; sizes.len()];
        dim_order_to_stride(sizes, dim_order, &mut strides)?;

        let Some(nbytes) = sizes
            .iter()
            .try_fold(1usize, |acc, &s| acc.checked_mul(s as usize))
            .and_then(|numel| numel.checked_mul(scalar_type.element_size()))
        else {
            return Err(TensorError::InvalidArgument(format!(
                "Byte size of {} tensor with sizes {:?} overflows usize",
                scalar_type, sizes
            )));
        };

        tracing::debug!(
            target: "tensor",
            %scalar_type,
            ?sizes,
            ?dim_order,
            nbytes,
            "planned tensor buffers"
        );

        Ok(Self {
            scalar_type,
            shape_dynamism,
            planned_sizes: sizes.to_vec(),
            planned_strides: strides.clone(),
            sizes: sizes.to_vec(),
            dim_order: dim_order.to_vec(),
            strides,
            data: vec![0; nbytes],
        })
    }

    /// Borrow the buffers as a tensor view.
    ///
    /// Every view starts at the planned shape, so its bound is the planned
    /// element count no matter how an earlier view was resized.
    pub fn view(&mut self) -> TensorImpl<'_> {
        self.sizes.copy_from_slice(&self.planned_sizes);
        self.strides.copy_from_slice(&self.planned_strides);
        TensorImpl::new(
            self.scalar_type,
            self.sizes.as_mut_slice(),
            Some(self.data.as_mut_slice()),
            Some(self.dim_order.as_slice()),
            Some(self.strides.as_mut_slice()),
            self.shape_dynamism,
        )
    }

    pub fn planned_sizes(&self) -> &[SizesType] {
        &self.planned_sizes
    }

    pub fn capacity_bytes(&self) -> usize {
        self.data.len()
    }
}
