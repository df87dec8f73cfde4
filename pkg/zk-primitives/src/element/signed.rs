use ethnum::U256;

use crate::Element;

impl Element {
    /// Encode a signed integer as a field element
    ///
    /// Negative values are represented as `MODULUS - |value|`, so that adding the encoding of `x`
    /// and `-x` yields zero
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// let deposit = Element::from_signed(1500);
    /// let withdraw = Element::from_signed(-1500);
    ///
    /// assert_eq!(deposit, Element::new(1500));
    /// assert_eq!(deposit + withdraw, Element::ZERO);
    /// ```
    #[must_use]
    pub fn from_signed(value: i128) -> Self {
        let magnitude = Element::from(value.unsigned_abs());

        match value.is_negative() {
            true => -magnitude,
            false => magnitude,
        }
    }

    /// Decode a field element produced by [`Element::from_signed`]
    ///
    /// Elements in the lower half of the field are positive, elements in the upper half are
    /// negative. Returns `None` if the magnitude does not fit in an `i128`
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// assert_eq!(Element::from_signed(-42).to_signed(), Some(-42));
    /// assert_eq!(Element::new(42).to_signed(), Some(42));
    /// assert_eq!(Element::ZERO.to_signed(), Some(0));
    ///
    /// // somewhere in the middle of the field
    /// let huge = Element::MODULUS.to_u256() >> 2;
    /// assert_eq!(Element::from(huge).to_signed(), None);
    /// ```
    #[must_use]
    pub fn to_signed(self) -> Option<i128> {
        let mut value = self;
        value.canonicalize();

        let half: U256 = Self::MODULUS.0 >> 1;

        let (negative, magnitude) = match value.0 <= half {
            true => (false, value.0),
            false => (true, Self::MODULUS.0 - value.0),
        };

        let magnitude = i128::try_from(u128::try_from(magnitude).ok()?).ok()?;

        match negative {
            true => Some(-magnitude),
            false => Some(magnitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_strategy::proptest;

    use super::*;

    #[proptest]
    fn signed_roundtrip(value: i64) {
        let value = i128::from(value);
        assert_eq!(Element::from_signed(value).to_signed(), Some(value));
    }

    #[test]
    fn minus_one_is_modulus_minus_one() {
        assert_eq!(Element::from_signed(-1), Element::MODULUS - Element::ONE);
    }
}
