use ethnum::U256;

mod arith;
mod base;
mod convert;
mod fmt;
mod signed;

#[cfg(feature = "borsh")]
mod borsh_impls;

#[cfg(feature = "rand")]
mod rand_impls;

#[cfg(feature = "serde")]
mod serde;

/// A value in the Pallas base field, stored as a [`U256`]
///
/// Keys, blindings, amounts, commitments, nullifiers and roots are all elements. Arithmetic is
/// modulo [`Element::MODULUS`] and its results are canonical, but an element decoded from raw
/// bytes may not be (see [`Element::canonicalize`]).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Element(#[cfg_attr(feature = "serde", serde(with = "serde"))] pub(crate) U256);

impl Element {
    /// The additive identity
    pub const ZERO: Self = Self(U256::ZERO);

    /// The multiplicative identity
    pub const ONE: Self = Self(U256::ONE);

    /// An empty leaf of the commitment tree
    pub const NULL_HASH: Self = Self::ZERO;

    /// Starting value of the fold in [`crate::hash_bytes`]
    pub(crate) const BYTE_HASH_IV: Self = Self(U256::new(2));

    /// An element holding a small integer, such as an amount or a leaf index
    #[inline]
    #[must_use]
    pub fn new(i: u64) -> Self {
        Self(U256::from(i))
    }

    /// The raw integer, which is only reduced if this element is canonical
    #[inline]
    #[must_use]
    pub fn to_u256(self) -> U256 {
        self.0
    }

    /// 64 hex digits, zero-padded
    #[inline]
    #[must_use]
    pub fn to_hex(self) -> String {
        hex::encode(self.to_be_bytes())
    }

    /// Whether this is [`Element::ZERO`] (a non-canonical multiple of the modulus is not)
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

macro_rules! int_eq {
    ($($int:ty),*) => {$(
        impl PartialEq<$int> for Element {
            fn eq(&self, other: &$int) -> bool {
                self.0 == U256::from(*other)
            }
        }
    )*};
}

int_eq!(u8, u16, u32, u64, u128);

#[cfg(any(test, feature = "proptest"))]
mod arbitrary_impls {
    use ::proptest::prelude::*;

    use super::Element;

    /// Uniform over canonical elements (up to the bias of reducing 256 random bits)
    impl Arbitrary for Element {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with((): ()) -> Self::Strategy {
            any::<[u8; 32]>()
                .prop_map(|bytes| {
                    let mut element = Element::from_be_bytes(bytes);
                    element.canonicalize();
                    element
                })
                .boxed()
        }
    }
}
