use ethnum::U256;
use ff::PrimeField;

use crate::{Base, Element};

impl Element {
    /// The order of the Pallas base field
    pub const MODULUS: Element = Element(U256::from_words(
        0x4000_0000_0000_0000_0000_0000_0000_0000,
        0x2246_98fc_094c_f91b_992d_30ed_0000_0001,
    ));

    /// The field value of this element, reducing it first if it is non-canonical
    #[inline]
    #[must_use]
    pub fn to_base(self) -> Base {
        let reduced = self.0 % Self::MODULUS.0;
        Base::from_raw(le_limbs(reduced.to_le_bytes()))
    }

    /// The canonical element for a field value
    #[inline]
    #[must_use]
    pub fn from_base(base: Base) -> Element {
        Self(U256::from_le_bytes(base.to_repr()))
    }

    /// Reduce this element modulo [`Element::MODULUS`]
    ///
    /// Canonical elements survive a round trip through [`Base`] unchanged
    #[inline]
    pub fn canonicalize(&mut self) {
        self.0 %= Self::MODULUS.0;
    }

    /// Whether this element is already reduced
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// assert!(Element::new(5).is_canonical());
    /// assert!(!Element::MODULUS.is_canonical());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.0 < Self::MODULUS.0
    }
}

impl From<Base> for Element {
    fn from(value: Base) -> Self {
        Element::from_base(value)
    }
}

impl From<Element> for Base {
    fn from(value: Element) -> Self {
        value.to_base()
    }
}

/// Little-endian bytes to the little-endian `u64` limbs [`Base::from_raw`] expects
fn le_limbs(bytes: [u8; 32]) -> [u64; 4] {
    let mut limbs = [0; 4];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut word = [0; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_le_bytes(word);
    }
    limbs
}

#[cfg(test)]
mod tests {
    use test_strategy::proptest;

    use super::*;

    #[proptest]
    fn canonical_elements_survive_base_round_trip(element: Element) {
        assert_eq!(Element::from_base(element.to_base()), element);
    }

    #[proptest]
    fn limbs_match_u256_words(bytes: [u8; 32]) {
        let limbs = le_limbs(bytes);
        let value = U256::from_le_bytes(bytes);

        assert_eq!(u128::from(limbs[0]) | (u128::from(limbs[1]) << 64), *value.low());
        assert_eq!(u128::from(limbs[2]) | (u128::from(limbs[3]) << 64), *value.high());
    }

    #[test]
    fn modulus_is_zero_in_the_field() {
        assert_eq!(Element::from_base(Element::MODULUS.to_base()), Element::ZERO);
        assert_eq!(Element::from(Base::from(1)), Element::ONE);
    }
}
