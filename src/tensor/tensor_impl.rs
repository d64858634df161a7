use std::fmt;

use crate::tensor::{
    DimOrderType, ScalarType, SizesType, StridesType, TensorShapeDynamism,
    dim_order::dim_order_to_stride,
};
use crate::utils::error::TensorError;

/// Non-owning view over planner-owned tensor buffers.
///
/// The view borrows the sizes, dim order, strides and data buffers for `'a`
/// and never allocates. Resizing rewrites `sizes` and `strides` in place.
pub struct TensorImpl<'a> {
    sizes: &'a mut [SizesType],
    dim_order: Option<&'a [DimOrderType]>,
    strides: Option<&'a mut [StridesType]>,
    data: Option<&'a mut [u8]>,
    numel: usize,
    numel_bound: usize,
    scalar_type: ScalarType,
    shape_dynamism: TensorShapeDynamism,
}

// Zero-dimensional tensors have one element.
fn compute_numel(sizes: &[SizesType]) -> usize {
    sizes
        .iter()
        .try_fold(1usize, |acc, &s| acc.checked_mul(s as usize))
        .unwrap_or_else(|| panic!("Element count of sizes {:?} overflows usize", sizes))
}

impl<'a> TensorImpl<'a> {
    /// Build a view over planned buffers.
    ///
    /// The element count at construction becomes the upper bound for every
    /// later resize. Panics if `scalar_type` is not valid, if a present
    /// `dim_order` or `strides` buffer does not have one entry per dimension,
    /// if an extent is negative or if the element count overflows `usize`.
    /// These are planner bugs, not runtime conditions.
    pub fn new(
        scalar_type: ScalarType,
        sizes: &'a mut [SizesType],
        data: Option<&'a mut [u8]>,
        dim_order: Option<&'a [DimOrderType]>,
        strides: Option<&'a mut [StridesType]>,
        shape_dynamism: TensorShapeDynamism,
    ) -> Self {
        assert!(
            scalar_type.is_valid(),
            "Invalid type {}",
            scalar_type as i8
        );
        let dim = sizes.len();
        if let Some(order) = dim_order {
            assert_eq!(order.len(), dim, "Dim order length must match rank");
        }
        if let Some(s) = strides.as_deref() {
            assert_eq!(s.len(), dim, "Strides length must match rank");
        }
        assert!(
            sizes.iter().all(|&s| s >= 0),
            "Negative extent in sizes {:?}",
            sizes
        );

        let numel = compute_numel(sizes);
        Self {
            sizes,
            dim_order,
            strides,
            data,
            numel,
            numel_bound: numel,
            scalar_type,
            shape_dynamism,
        }
    }

    pub fn dim(&self) -> usize {
        self.sizes.len()
    }

    pub fn numel(&self) -> usize {
        self.numel
    }

    /// Largest element count a resize may reach.
    pub fn numel_bound(&self) -> usize {
        self.numel_bound
    }

    pub fn nbytes(&self) -> usize {
        self.numel * self.scalar_type.element_size()
    }

    pub fn element_size(&self) -> usize {
        self.scalar_type.element_size()
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    pub fn shape_dynamism(&self) -> TensorShapeDynamism {
        self.shape_dynamism
    }

    pub fn sizes(&self) -> &[SizesType] {
        self.sizes
    }

    pub fn size(&self, dim: usize) -> SizesType {
        assert!(
            dim < self.dim(),
            "Dimension out of range (expected to be in range of [0, {}], but got {})",
            self.dim().saturating_sub(1),
            dim
        );
        self.sizes[dim]
    }

    /// Empty when the planner supplied no strides buffer.
    pub fn strides(&self) -> &[StridesType] {
        self.strides.as_deref().unwrap_or(&[])
    }

    /// Empty when the planner supplied no dim order buffer.
    pub fn dim_order(&self) -> &[DimOrderType] {
        self.dim_order.unwrap_or(&[])
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn mutable_data(&mut self) -> Option<&mut [u8]> {
        self.data.as_deref_mut()
    }

    /// Point the view at new storage, e.g. once the planner binds memory.
    pub fn set_data(&mut self, data: Option<&'a mut [u8]>) {
        self.data = data;
    }

    /// Change the logical shape without touching the physical layout.
    ///
    /// Nothing is written unless every check passes, so a failed resize
    /// leaves sizes, strides and the element count as they were.
    pub fn resize(&mut self, new_sizes: &[SizesType]) -> Result<(), TensorError> {
        check_or_return_error!(
            new_sizes.len() == self.dim(),
            TensorError::RankMismatch {
                old: self.dim(),
                new: new_sizes.len(),
            }
        );

        // Kernels resize their outputs unconditionally, so a zero-dim output
        // reaching here already has the only shape it can have.
        if self.dim() == 0 {
            return Ok(());
        }

        if !self.shape_dynamism.is_dynamic() {
            check_or_return_error!(
                *self.sizes == *new_sizes,
                TensorError::UnsupportedResize(format!(
                    "Attempted to resize a static tensor from {:?} to {:?}",
                    self.sizes, new_sizes
                ))
            );
        } else {
            // Unbound tensors would need reallocation to grow; treat them as bounded.
            check_or_return_error!(
                new_sizes.iter().all(|&s| s >= 0),
                TensorError::InvalidArgument(format!(
                    "Negative extent in requested sizes {:?}",
                    new_sizes
                ))
            );
            // an overflowing product is over any bound
            let Some(new_numel) = new_sizes
                .iter()
                .try_fold(1usize, |acc, &s| acc.checked_mul(s as usize))
                .filter(|&n| n <= self.numel_bound)
            else {
                return_error!(TensorError::UnsupportedResize(format!(
                    "Attempted to resize a bounded tensor with capacity of {} elements to {:?}",
                    self.numel_bound, new_sizes
                )));
            };

            let dim_order = self.dim_order;
            let Some(strides) = self.strides.as_deref_mut() else {
                return_error!(TensorError::Internal(
                    "Strides cannot be absent for resize".into()
                ));
            };
            let Some(dim_order) = dim_order else {
                return_error!(TensorError::Internal(
                    "Dim order cannot be absent for resize".into()
                ));
            };

            dim_order_to_stride(new_sizes, dim_order, strides).map_err(|e| {
                TensorError::Internal(format!("Failed to recompute strides: {}", e))
            })?;

            self.numel = new_numel;
            self.sizes.copy_from_slice(new_sizes);
        }

        tracing::trace!(
            target: "tensor",
            sizes = ?self.sizes,
            numel = self.numel,
            "resized tensor"
        );
        Ok(())
    }
}

impl fmt::Debug for TensorImpl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorImpl")
            .field("scalar_type", &self.scalar_type)
            .field("sizes", &self.sizes)
            .field("dim_order", &self.dim_order)
            .field("strides", &self.strides)
            .field("numel", &self.numel)
            .field("numel_bound", &self.numel_bound)
            .field("shape_dynamism", &self.shape_dynamism)
            .field("data_len", &self.data.as_ref().map(|d| d.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_major(sizes: &[SizesType], dim_order: &[DimOrderType], strides: &mut [StridesType]) {
        dim_order_to_stride(sizes, dim_order, strides).unwrap();
    }

    #[test]
    fn construction_computes_numel_and_bound() {
        let mut sizes = [3, 4];
        let order = [0, 1];
        let mut strides = [0; 2];
        row_major(&sizes, &order, &mut strides);
        let mut data = vec![0u8; 48];

        let t = TensorImpl::new(
            ScalarType::Float,
            &mut sizes,
            Some(&mut data),
            Some(&order),
            Some(&mut strides),
            TensorShapeDynamism::DynamicBound,
        );
        assert_eq!(t.dim(), 2);
        assert_eq!(t.numel(), 12);
        assert_eq!(t.numel_bound(), 12);
        assert_eq!(t.nbytes(), 48);
        assert_eq!(t.element_size(), 4);
        assert_eq!(t.strides(), &[4, 1]);
        assert_eq!(t.size(1), 4);
        assert_eq!(t.data().map(|d| d.len()), Some(48));
    }

    #[test]
    #[should_panic(expected = "Invalid type")]
    fn undefined_scalar_type_panics() {
        let mut sizes = [2];
        TensorImpl::new(
            ScalarType::Undefined,
            &mut sizes,
            None,
            None,
            None,
            TensorShapeDynamism::Static,
        );
    }

    #[test]
    #[should_panic(expected = "Strides length must match rank")]
    fn mismatched_strides_panics() {
        let mut sizes = [2, 2];
        let mut strides = [1];
        TensorImpl::new(
            ScalarType::Int,
            &mut sizes,
            None,
            None,
            Some(&mut strides),
            TensorShapeDynamism::Static,
        );
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn overflowing_planned_sizes_panic() {
        let mut sizes = [65536; 4];
        TensorImpl::new(
            ScalarType::Byte,
            &mut sizes,
            None,
            None,
            None,
            TensorShapeDynamism::DynamicBound,
        );
    }

    #[test]
    fn worked_example() {
        let mut sizes = [3, 4];
        let order = [0, 1];
        let mut strides = [0; 2];
        row_major(&sizes, &order, &mut strides);

        let mut t = TensorImpl::new(
            ScalarType::Float,
            &mut sizes,
            None,
            Some(&order),
            Some(&mut strides),
            TensorShapeDynamism::DynamicBound,
        );

        t.resize(&[2, 4]).unwrap();
        assert_eq!(t.numel(), 8);
        assert_eq!(t.sizes(), &[2, 4]);
        assert_eq!(t.strides(), &[4, 1]);

        let err = t.resize(&[3, 5]).unwrap_err();
        assert!(matches!(err, TensorError::UnsupportedResize(_)));
        assert_eq!(t.numel(), 8);
        assert_eq!(t.sizes(), &[2, 4]);
        assert_eq!(t.strides(), &[4, 1]);
    }

    #[test]
    fn static_resize_only_validates() {
        let mut sizes = [2, 3];
        let order = [0, 1];
        let mut strides = [3, 1];
        let mut t = TensorImpl::new(
            ScalarType::Long,
            &mut sizes,
            None,
            Some(&order),
            Some(&mut strides),
            TensorShapeDynamism::Static,
        );

        t.resize(&[2, 3]).unwrap();
        assert_eq!(t.strides(), &[3, 1]);

        let err = t.resize(&[3, 2]).unwrap_err();
        assert!(matches!(err, TensorError::UnsupportedResize(_)));
        assert_eq!(t.sizes(), &[2, 3]);

        let err = t.resize(&[6]).unwrap_err();
        assert_eq!(err, TensorError::RankMismatch { old: 2, new: 1 });
    }

    #[test]
    fn unbound_is_capacity_bounded() {
        let mut sizes = [4];
        let order = [0];
        let mut strides = [1];
        let mut t = TensorImpl::new(
            ScalarType::Byte,
            &mut sizes,
            None,
            Some(&order),
            Some(&mut strides),
            TensorShapeDynamism::DynamicUnbound,
        );
        t.resize(&[4]).unwrap();
        t.resize(&[0]).unwrap();
        assert_eq!(t.numel(), 0);
        assert_eq!(t.nbytes(), 0);
        assert!(matches!(
            t.resize(&[5]),
            Err(TensorError::UnsupportedResize(_))
        ));
    }

    #[test]
    fn scalar_accepts_any_empty_resize() {
        let mut sizes: [SizesType; 0] = [];
        for dynamism in [
            TensorShapeDynamism::Static,
            TensorShapeDynamism::DynamicBound,
            TensorShapeDynamism::DynamicUnbound,
        ] {
            let mut t =
                TensorImpl::new(ScalarType::Double, &mut sizes, None, None, None, dynamism);
            assert_eq!(t.numel(), 1);
            t.resize(&[]).unwrap();
            assert_eq!(t.numel(), 1);
            assert_eq!(t.nbytes(), 8);
            assert_eq!(
                t.resize(&[1]),
                Err(TensorError::RankMismatch { old: 0, new: 1 })
            );
        }
    }

    #[test]
    fn missing_layout_buffers_are_internal_errors() {
        let mut sizes = [2, 2];
        let order = [0, 1];
        let mut t = TensorImpl::new(
            ScalarType::Int,
            &mut sizes,
            None,
            Some(&order),
            None,
            TensorShapeDynamism::DynamicBound,
        );
        assert!(matches!(t.resize(&[1, 2]), Err(TensorError::Internal(_))));
        assert_eq!(t.sizes(), &[2, 2]);
        assert_eq!(t.numel(), 4);

        let mut sizes = [2, 2];
        let mut strides = [2, 1];
        let mut t = TensorImpl::new(
            ScalarType::Int,
            &mut sizes,
            None,
            None,
            Some(&mut strides),
            TensorShapeDynamism::DynamicBound,
        );
        assert!(matches!(t.resize(&[1, 2]), Err(TensorError::Internal(_))));
        assert_eq!(t.strides(), &[2, 1]);
    }

    #[test]
    fn invalid_dim_order_surfaces_as_internal() {
        let mut sizes = [2, 2];
        let order = [1, 1];
        let mut strides = [2, 1];
        let mut t = TensorImpl::new(
            ScalarType::Int,
            &mut sizes,
            None,
            Some(&order),
            Some(&mut strides),
            TensorShapeDynamism::DynamicBound,
        );
        assert!(matches!(t.resize(&[1, 2]), Err(TensorError::Internal(_))));
        assert_eq!(t.sizes(), &[2, 2]);
        assert_eq!(t.strides(), &[2, 1]);
    }

    #[test]
    fn negative_and_overflowing_requests() {
        let mut sizes = [2, 2];
        let order = [0, 1];
        let mut strides = [2, 1];
        let mut t = TensorImpl::new(
            ScalarType::Int,
            &mut sizes,
            None,
            Some(&order),
            Some(&mut strides),
            TensorShapeDynamism::DynamicBound,
        );
        assert!(matches!(
            t.resize(&[-1, 2]),
            Err(TensorError::InvalidArgument(_))
        ));
        assert!(matches!(
            t.resize(&[i32::MAX, i32::MAX]),
            Err(TensorError::UnsupportedResize(_))
        ));
        assert_eq!(t.sizes(), &[2, 2]);
    }

    #[test]
    fn set_data_rebinds_storage() {
        let mut sizes = [2];
        let mut first = vec![1u8; 2];
        let mut second = vec![2u8; 2];
        let mut t = TensorImpl::new(
            ScalarType::Byte,
            &mut sizes,
            Some(&mut first),
            None,
            None,
            TensorShapeDynamism::Static,
        );
        assert_eq!(t.data(), Some(&[1u8, 1][..]));
        t.set_data(Some(&mut second));
        if let Some(d) = t.mutable_data() {
            d[0] = 9;
        }
        assert_eq!(t.data(), Some(&[9u8, 2][..]));
        t.set_data(None);
        assert!(t.data().is_none());
    }
}
