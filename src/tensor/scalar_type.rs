use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::error::TensorError;

/// Element types understood by the runtime.
///
/// Discriminants are the runtime's serialized type codes, so they must not
/// be reordered. `Undefined` is the only variant that is not valid for a
/// tensor.
#[repr(i8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    Byte = 0,
    Char = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Half = 5,
    Float = 6,
    Double = 7,
    ComplexHalf = 8,
    ComplexFloat = 9,
    ComplexDouble = 10,
    Bool = 11,
    QInt8 = 12,
    QUInt8 = 13,
    QInt32 = 14,
    BFloat16 = 15,
    QUInt4x2 = 16,
    QUInt2x4 = 17,
    Bits1x8 = 18,
    Bits2x4 = 19,
    Bits4x2 = 20,
    Bits8 = 21,
    Bits16 = 22,
    Undefined = -1,
}

impl ScalarType {
    pub fn is_valid(self) -> bool {
        !matches!(self, ScalarType::Undefined)
    }

    /// Width of one element in bytes.
    ///
    /// Panics for `Undefined`; tensors can only be built from valid types so
    /// this never fires for a type read back from a `TensorImpl`.
    pub fn element_size(self) -> usize {
        match self {
            ScalarType::Byte | ScalarType::Char | ScalarType::Bool => 1,
            ScalarType::QInt8 | ScalarType::QUInt8 => 1,
            ScalarType::QUInt4x2 | ScalarType::QUInt2x4 => 1,
            ScalarType::Bits1x8 | ScalarType::Bits2x4 | ScalarType::Bits4x2 | ScalarType::Bits8 => 1,
            ScalarType::Short | ScalarType::Half | ScalarType::BFloat16 | ScalarType::Bits16 => 2,
            ScalarType::Int | ScalarType::Float | ScalarType::QInt32 | ScalarType::ComplexHalf => 4,
            ScalarType::Long | ScalarType::Double | ScalarType::ComplexFloat => 8,
            ScalarType::ComplexDouble => 16,
            ScalarType::Undefined => panic!("Unknown ScalarType {}", self as i8),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Byte => "Byte",
            ScalarType::Char => "Char",
            ScalarType::Short => "Short",
            ScalarType::Int => "Int",
            ScalarType::Long => "Long",
            ScalarType::Half => "Half",
            ScalarType::Float => "Float",
            ScalarType::Double => "Double",
            ScalarType::ComplexHalf => "ComplexHalf",
            ScalarType::ComplexFloat => "ComplexFloat",
            ScalarType::ComplexDouble => "ComplexDouble",
            ScalarType::Bool => "Bool",
            ScalarType::QInt8 => "QInt8",
            ScalarType::QUInt8 => "QUInt8",
            ScalarType::QInt32 => "QInt32",
            ScalarType::BFloat16 => "BFloat16",
            ScalarType::QUInt4x2 => "QUInt4x2",
            ScalarType::QUInt2x4 => "QUInt2x4",
            ScalarType::Bits1x8 => "Bits1x8",
            ScalarType::Bits2x4 => "Bits2x4",
            ScalarType::Bits4x2 => "Bits4x2",
            ScalarType::Bits8 => "Bits8",
            ScalarType::Bits16 => "Bits16",
            ScalarType::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i8> for ScalarType {
    type Error = TensorError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => ScalarType::Byte,
            1 => ScalarType::Char,
            2 => ScalarType::Short,
            3 => ScalarType::Int,
            4 => ScalarType::Long,
            5 => ScalarType::Half,
            6 => ScalarType::Float,
            7 => ScalarType::Double,
            8 => ScalarType::ComplexHalf,
            9 => ScalarType::ComplexFloat,
            10 => ScalarType::ComplexDouble,
            11 => ScalarType::Bool,
            12 => ScalarType::QInt8,
            13 => ScalarType::QUInt8,
            14 => ScalarType::QInt32,
            15 => ScalarType::BFloat16,
            16 => ScalarType::QUInt4x2,
            17 => ScalarType::QUInt2x4,
            18 => ScalarType::Bits1x8,
            19 => ScalarType::Bits2x4,
            20 => ScalarType::Bits4x2,
            21 => ScalarType::Bits8,
            22 => ScalarType::Bits16,
            -1 => ScalarType::Undefined,
            other => {
                return Err(TensorError::InvalidArgument(format!(
                    "Unknown scalar type code {}",
                    other
                )));
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_sizes_match_native_widths() {
        assert_eq!(ScalarType::Byte.element_size(), std::mem::size_of::<u8>());
        assert_eq!(ScalarType::Short.element_size(), std::mem::size_of::<i16>());
        assert_eq!(ScalarType::Int.element_size(), std::mem::size_of::<i32>());
        assert_eq!(ScalarType::Long.element_size(), std::mem::size_of::<i64>());
        assert_eq!(ScalarType::Float.element_size(), std::mem::size_of::<f32>());
        assert_eq!(ScalarType::Double.element_size(), std::mem::size_of::<f64>());
        assert_eq!(ScalarType::Bool.element_size(), std::mem::size_of::<bool>());
        assert_eq!(ScalarType::ComplexDouble.element_size(), 16);
        assert_eq!(ScalarType::BFloat16.element_size(), 2);
    }

    #[test]
    fn codes_round_trip_through_try_from() {
        for code in 0i8..=22 {
            let ty = ScalarType::try_from(code).unwrap();
            assert_eq!(ty as i8, code);
            assert!(ty.is_valid());
        }
        assert_eq!(ScalarType::try_from(-1).unwrap(), ScalarType::Undefined);
        assert!(!ScalarType::Undefined.is_valid());
    }

    #[test]
    fn unknown_code_is_rejected() {
        match ScalarType::try_from(23) {
            Err(TensorError::InvalidArgument(msg)) => assert!(msg.contains("23")),
            other => panic!("expected invalid argument, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "Unknown ScalarType")]
    fn undefined_has_no_width() {
        ScalarType::Undefined.element_size();
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(ScalarType::Float.to_string(), "Float");
    }
}
