use std::{
    cmp::Ordering,
    fmt::Debug,
    ops::{Add, Sub},
};

/// Numeric type usable as an edge weight, distance or capacity.
///
/// Implemented for all primitive integers and floats. The associated `Ord`
/// type gives a total order even for floats, which binary heaps require.
pub trait Weight:
    PartialOrd + Add<Self, Output = Self> + Sub<Self, Output = Self> + Copy + Debug + Sized
{
    type Ord: Ord + From<Self> + Into<Self>;

    fn zero() -> Self;
    fn is_unsigned() -> bool;

    fn is_negative(&self) -> bool {
        // The check for unsignedness should eliminate the comparison, because
        // the implementation of `is_unsigned` method is always a constant
        // boolean in practice.
        !Self::is_unsigned() && *self < Self::zero()
    }
}

/// A value ordered solely by its attached weight.
#[derive(Debug, Clone, Copy)]
pub struct Weighted<T, W>(pub T, pub W);

impl<T, W: PartialEq> PartialEq for Weighted<T, W> {
    fn eq(&self, other: &Self) -> bool {
        self.1.eq(&other.1)
    }
}

impl<T, W: Eq> Eq for Weighted<T, W> {}

impl<T, W: PartialOrd> PartialOrd for Weighted<T, W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.1.partial_cmp(&other.1)
    }
}

impl<T, W: Ord> Ord for Weighted<T, W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.1.cmp(&other.1)
    }
}

macro_rules! impl_int_weight {
    ($ty:ty, $is_unsigned:expr) => {
        impl Weight for $ty {
            type Ord = Self;

            fn zero() -> Self {
                0
            }

            fn is_unsigned() -> bool {
                $is_unsigned
            }
        }
    };
}

impl_int_weight!(i8, false);
impl_int_weight!(i16, false);
impl_int_weight!(i32, false);
impl_int_weight!(i64, false);
impl_int_weight!(u8, true);
impl_int_weight!(u16, true);
impl_int_weight!(u32, true);
impl_int_weight!(u64, true);
impl_int_weight!(isize, false);
impl_int_weight!(usize, true);

/// Float wrapper ordered by [`total_cmp`](f64::total_cmp).
#[derive(Debug, Default, Clone, Copy)]
pub struct TotalOrd<T>(T);

macro_rules! impl_float_weight {
    ($ty:ty) => {
        impl PartialEq for TotalOrd<$ty> {
            fn eq(&self, other: &Self) -> bool {
                self.cmp(other).is_eq()
            }
        }

        impl Eq for TotalOrd<$ty> {}

        impl PartialOrd for TotalOrd<$ty> {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for TotalOrd<$ty> {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl From<$ty> for TotalOrd<$ty> {
            fn from(value: $ty) -> Self {
                Self(value)
            }
        }

        impl From<TotalOrd<$ty>> for $ty {
            fn from(value: TotalOrd<$ty>) -> Self {
                value.0
            }
        }

        impl Weight for $ty {
            type Ord = TotalOrd<Self>;

            fn zero() -> Self {
                <$ty>::default()
            }

            fn is_unsigned() -> bool {
                false
            }
        }
    };
}

impl_float_weight!(f32);
impl_float_weight!(f64);
