use ff::Field;
use rand::{CryptoRng, RngCore};

use crate::{Base, Element};

impl Element {
    /// Generate a uniformly random element of the field
    ///
    /// Used for note blindings and spending keys
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// let mut rng = rand::thread_rng();
    /// let a = Element::secure_random(&mut rng);
    /// let b = Element::secure_random(&mut rng);
    ///
    /// assert!(a.is_canonical());
    /// assert_ne!(a, b);
    /// ```
    #[inline]
    #[must_use]
    pub fn secure_random(rng: impl RngCore + CryptoRng) -> Self {
        Element::from_base(Base::random(rng))
    }
}
