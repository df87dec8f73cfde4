use core::num::TryFromIntError;
use std::str::FromStr;

use ethnum::U256;

use crate::Element;

macro_rules! int_conversions {
    ($($t:ty),*) => {$(
        impl From<$t> for Element {
            #[inline]
            fn from(value: $t) -> Self {
                Element(U256::from(value))
            }
        }

        impl TryFrom<Element> for $t {
            type Error = TryFromIntError;

            #[inline]
            fn try_from(value: Element) -> Result<Self, Self::Error> {
                <$t>::try_from(value.0)
            }
        }
    )*};
}

int_conversions!(u8, u16, u32, u64, u128);

impl From<U256> for Element {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<Element> for U256 {
    fn from(value: Element) -> Self {
        value.0
    }
}

/// Parses hex, with or without a `0x` prefix
impl FromStr for Element {
    type Err = <U256 as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        U256::from_str_radix(digits, 16).map(Self)
    }
}

impl Element {
    /// The amount this element encodes, if it fits in a `u64`
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// assert_eq!(Element::new(1500).to_u64(), Some(1500));
    /// assert_eq!(Element::MODULUS.to_u64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn to_u64(self) -> Option<u64> {
        u64::try_from(self.0).ok()
    }

    /// The 32-byte big-endian encoding used on the wire
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// let bytes = Element::new(0x0102).to_be_bytes();
    /// assert_eq!(bytes[30..], [1, 2]);
    /// assert_eq!(Element::from_be_bytes(bytes), Element::new(0x0102));
    /// ```
    #[inline]
    #[must_use]
    pub fn to_be_bytes(self) -> [u8; 32] {
        self.0.to_be_bytes()
    }

    /// Decode [`Element::to_be_bytes`], without reducing the result
    #[inline]
    #[must_use]
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(U256::from_be_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_optional_prefix() {
        assert_eq!("0".parse::<Element>().unwrap(), Element::ZERO);
        assert_eq!("0x1".parse::<Element>().unwrap(), Element::ONE);
        assert_eq!("5dc".parse::<Element>().unwrap(), Element::new(1500));
        assert_eq!("0xFF".parse::<Element>().unwrap(), Element::new(255));
        assert!("0xnope".parse::<Element>().is_err());
    }

    #[test]
    fn integer_conversions_are_checked() {
        assert_eq!(u8::try_from(Element::new(255)), Ok(255));
        assert!(u8::try_from(Element::new(256)).is_err());
        assert!(u128::try_from(Element::MODULUS).is_err());
    }
}
