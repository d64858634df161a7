//! Conversions between dim orders and strides.
//!
//! A dim order lists logical axes from outermost to innermost in memory, so
//! `[0, 1]` is row-major and `[0, 2, 3, 1]` is channels-last for NCHW.

use crate::tensor::{DimOrderType, SizesType, StridesType};
use crate::utils::error::TensorError;

/// True when `dim_order` is a permutation of `0..dims`.
pub fn validate_dim_order(dim_order: &[DimOrderType], dims: usize) -> bool {
    if dim_order.len() != dims {
        return false;
    }
    // One slot per representable axis index.
    let mut seen = [false; DimOrderType::MAX as usize + 1];
    for &d in dim_order {
        let d = d as usize;
        if d >= dims || seen[d] {
            return false;
        }
        seen[d] = true;
    }
    true
}

pub fn is_contiguous_dim_order(dim_order: &[DimOrderType]) -> bool {
    dim_order.iter().enumerate().all(|(i, &d)| d as usize == i)
}

/// Channels-last is only defined for 4D (NHWC) and 5D (NDHWC) tensors.
pub fn is_channels_last_dim_order(dim_order: &[DimOrderType]) -> bool {
    let dims = dim_order.len();
    if dims != 4 && dims != 5 {
        return false;
    }
    if dim_order[0] != 0 || dim_order[dims - 1] != 1 {
        return false;
    }
    dim_order[1..dims - 1]
        .iter()
        .enumerate()
        .all(|(i, &d)| d as usize == i + 2)
}

/// Recompute `strides` for `sizes` laid out in `dim_order`.
///
/// The innermost axis gets stride 1 and each outer axis steps over every
/// faster varying one. A zero extent contributes a factor of 1 so the outer
/// strides stay meaningful. `strides` is only written once every check has
/// passed.
pub fn dim_order_to_stride(
    sizes: &[SizesType],
    dim_order: &[DimOrderType],
    strides: &mut [StridesType],
) -> Result<(), TensorError> {
    let dims = sizes.len();
    if dims == 0 {
        return Ok(());
    }
    check_or_return_error!(
        strides.len() == dims,
        TensorError::InvalidArgument(format!(
            "Strides length {} does not match rank {}",
            strides.len(),
            dims
        ))
    );
    check_or_return_error!(
        validate_dim_order(dim_order, dims),
        TensorError::InvalidArgument(format!(
            "Dim order {:?} is not a permutation of 0..{}",
            dim_order, dims
        ))
    );
    check_or_return_error!(
        sizes.iter().all(|&s| s >= 0),
        TensorError::InvalidArgument(format!("Negative extent in sizes {:?}", sizes))
    );

    let mut running: StridesType = 1;
    for i in (1..dims).rev() {
        let size = sizes[dim_order[i] as usize];
        if size != 0 {
            match running.checked_mul(size) {
                Some(next) => running = next,
                None => return_error!(TensorError::InvalidArgument(format!(
                    "Strides for sizes {:?} overflow the stride type",
                    sizes
                ))),
            }
        }
    }

    strides[dim_order[dims - 1] as usize] = 1;
    for i in (0..dims - 1).rev() {
        let inner = dim_order[i + 1] as usize;
        let size = sizes[inner];
        strides[dim_order[i] as usize] = if size == 0 {
            strides[inner]
        } else {
            strides[inner] * size
        };
    }
    Ok(())
}

/// Recover the dim order implied by `strides`: axes sorted by descending
/// stride, ties kept in logical order.
pub fn stride_to_dim_order(
    strides: &[StridesType],
    dim_order: &mut [DimOrderType],
) -> Result<(), TensorError> {
    let dims = strides.len();
    check_or_return_error!(
        dim_order.len() == dims,
        TensorError::InvalidArgument(format!(
            "Dim order length {} does not match rank {}",
            dim_order.len(),
            dims
        ))
    );
    check_or_return_error!(
        dims <= DimOrderType::MAX as usize + 1,
        TensorError::InvalidArgument(format!("Rank {} does not fit the dim order type", dims))
    );

    for (i, d) in dim_order.iter_mut().enumerate() {
        *d = i as DimOrderType;
    }
    // insertion sort keeps this stable and allocation free
    for i in 1..dims {
        let mut j = i;
        while j > 0 && strides[dim_order[j - 1] as usize] < strides[dim_order[j] as usize] {
            dim_order.swap(j - 1, j);
            j -= 1;
        }
    }
    Ok(())
}
