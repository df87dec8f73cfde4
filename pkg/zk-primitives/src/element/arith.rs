use crate::Element;

/// A field operation, also accepting unsigned integers on the right
macro_rules! binop {
    ($trait:ident, $f:ident, $op:tt) => {
        impl core::ops::$trait<Element> for Element {
            type Output = Element;

            #[inline]
            fn $f(self, rhs: Element) -> Element {
                Element::from_base(self.to_base() $op rhs.to_base())
            }
        }

        binop!(@ints $trait, $f, $op, u8, u16, u32, u64, u128);
    };
    (@ints $trait:ident, $f:ident, $op:tt, $($int:ty),*) => {$(
        impl core::ops::$trait<$int> for Element {
            type Output = Element;

            #[inline]
            fn $f(self, rhs: $int) -> Element {
                self $op Element::from(rhs)
            }
        }
    )*};
}

binop!(Add, add, +);
binop!(Sub, sub, -);
binop!(Mul, mul, *);

impl core::ops::AddAssign for Element {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl core::ops::SubAssign for Element {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl core::ops::Neg for Element {
    type Output = Element;

    #[inline]
    fn neg(self) -> Self::Output {
        Element::from_base(-self.to_base())
    }
}

impl core::iter::Sum for Element {
    fn sum<I: Iterator<Item = Element>>(iter: I) -> Self {
        iter.fold(Element::ZERO, core::ops::Add::add)
    }
}

#[cfg(test)]
mod tests {
    use test_strategy::proptest;

    use super::*;

    #[proptest]
    fn add_then_sub_is_identity(a: Element, b: Element) {
        assert_eq!(a + b - b, a);
    }

    #[proptest]
    fn negation_is_additive_inverse(a: Element) {
        assert_eq!(a + (-a), Element::ZERO);
    }
}
