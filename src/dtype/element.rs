//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::Zeroable;
use std::fmt::Debug;

/// Trait for types that can be coefficients of a matrix expression
///
/// This trait connects Rust's type system to densexpr's runtime dtype tags.
/// It's implemented for all primitive numeric types and `bool`.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - coefficients are plain values
/// - `Zeroable` - the all-zero bit pattern is the type's zero (bytemuck)
/// - `PartialEq + PartialOrd` - truthiness and coefficient-wise comparison
///
/// Arithmetic is deliberately not required so that `bool` can be an element:
/// condition matrices are usually boolean.
pub trait Element:
    Copy + Clone + Send + Sync + Zeroable + PartialEq + PartialOrd + Debug + 'static
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Convert to f64 for generic conversions
    ///
    /// `bool` maps to 0.0 / 1.0.
    fn to_f64(self) -> f64;

    /// Convert from f64 to this type
    ///
    /// Integer types truncate toward zero and saturate; `bool` is true for
    /// any non-zero input.
    fn from_f64(v: f64) -> Self;

    /// Zero value
    #[inline]
    fn zero() -> Self {
        Self::zeroed()
    }

    /// One value
    fn one() -> Self;

    /// Whether this value counts as true when used as a condition
    ///
    /// A coefficient is truthy when it compares not-equal to zero. For floats
    /// NaN is truthy and `-0.0` is not.
    #[inline]
    fn is_truthy(self) -> bool {
        self != Self::zero()
    }
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn one() -> Self {
        1.0
    }
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn one() -> Self {
        1.0
    }
}

macro_rules! impl_int_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $ty
                }

                #[inline]
                fn one() -> Self {
                    1
                }
            }
        )*
    };
}

impl_int_element!(
    i64 => I64,
    i32 => I32,
    i16 => I16,
    i8 => I8,
    u64 => U64,
    u32 => U32,
    u16 => U16,
    u8 => U8,
);

impl Element for bool {
    const DTYPE: DType = DType::Bool;

    #[inline]
    fn to_f64(self) -> f64 {
        if self { 1.0 } else { 0.0 }
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v != 0.0
    }

    #[inline]
    fn one() -> Self {
        true
    }

    #[inline]
    fn is_truthy(self) -> bool {
        self
    }
}

#[cfg(feature = "f16")]
impl Element for half::f16 {
    const DTYPE: DType = DType::F16;

    #[inline]
    fn to_f64(self) -> f64 {
        half::f16::to_f64(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        half::f16::from_f64(v)
    }

    #[inline]
    fn one() -> Self {
        half::f16::ONE
    }
}

#[cfg(feature = "f16")]
impl Element for half::bf16 {
    const DTYPE: DType = DType::BF16;

    #[inline]
    fn to_f64(self) -> f64 {
        half::bf16::to_f64(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        half::bf16::from_f64(v)
    }

    #[inline]
    fn one() -> Self {
        half::bf16::ONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_dtype() {
        assert_eq!(f64::DTYPE, DType::F64);
        assert_eq!(f32::DTYPE, DType::F32);
        assert_eq!(i32::DTYPE, DType::I32);
        assert_eq!(u8::DTYPE, DType::U8);
        assert_eq!(bool::DTYPE, DType::Bool);
    }

    #[test]
    fn test_element_conversions() {
        assert_eq!(f32::from_f64(2.5).to_f64(), 2.5f32 as f64);
        assert_eq!(i32::from_f64(42.9), 42);
        assert_eq!(u8::from_f64(-3.0), 0);
        assert!(bool::from_f64(0.5));
        assert_eq!(true.to_f64(), 1.0);
    }

    #[test]
    fn test_zero_is_zeroed() {
        assert_eq!(f64::zero(), 0.0);
        assert_eq!(i16::zero(), 0);
        assert!(!bool::zero());
        assert!(bool::one());
    }

    #[test]
    fn test_truthiness() {
        assert!(1u8.is_truthy());
        assert!(!0i32.is_truthy());
        assert!((-2.5f32).is_truthy());
        assert!(!(-0.0f64).is_truthy());
        assert!(f64::NAN.is_truthy());
        assert!(true.is_truthy());
        assert!(!false.is_truthy());
    }

    #[cfg(feature = "f16")]
    #[test]
    fn test_half_elements() {
        assert_eq!(half::f16::DTYPE, DType::F16);
        assert!(!half::bf16::zero().is_truthy());
        assert_eq!(half::f16::one().to_f64(), 1.0);
    }
}
