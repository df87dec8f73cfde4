use halo2_gadgets::poseidon::primitives::{ConstantLength, Hash, P128Pow5T3};

use crate::{Base, Element};

/// Poseidon hash of `N` elements
///
/// Merkle nodes are `hash_merge([left, right])`; commitments, nullifiers and owner keys are built
/// from the same function with other arities. Order matters:
/// ```rust
/// # use zk_primitives::*;
/// let (one, two) = (Element::new(1), Element::new(2));
/// assert_ne!(hash_merge([one, two]), hash_merge([two, one]));
/// ```
/// and so does the arity, which is part of the Poseidon domain:
/// ```rust
/// # use zk_primitives::*;
/// let a = Element::new(1);
/// assert_ne!(hash_merge([a, Element::ZERO]), hash_merge([a, Element::ZERO, Element::ZERO]));
/// ```
#[inline]
#[must_use]
pub fn hash_merge<const N: usize>(elements: [Element; N]) -> Element {
    let hasher = Hash::<Base, P128Pow5T3, ConstantLength<N>, 3, 2>::init();
    Element::from_base(hasher.hash(elements.map(Element::to_base)))
}

/// Hash arbitrary bytes by folding 16-byte chunks into a running [`hash_merge`]
///
/// ```rust
/// # use zk_primitives::*;
/// assert_ne!(hash_bytes(b"transcript a"), hash_bytes(b"transcript b"));
/// ```
#[inline]
#[must_use]
pub fn hash_bytes(bytes: &[u8]) -> Element {
    // an element is slightly smaller than a "u255", so 16-byte chunks always fit
    bytes
        .chunks(core::mem::size_of::<u128>())
        .map(bytes_to_element)
        .fold(Element::BYTE_HASH_IV, |left, right| hash_merge([left, right]))
}

/// A chunk of at most 16 bytes, right-padded with zeroes
fn bytes_to_element(chunk: &[u8]) -> Element {
    let mut word = [0; 16];
    word[..chunk.len()].copy_from_slice(chunk);
    Element::from(u128::from_be_bytes(word))
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

    use super::*;

    #[test]
    fn hash_merge_is_deterministic() {
        let mut rng = ChaChaRng::from_seed([0; 32]);

        for _ in 0..20 {
            let left = Element::secure_random(&mut rng);
            let right = Element::secure_random(&mut rng);

            assert_eq!(hash_merge([left, right]), hash_merge([left, right]));
            assert!(hash_merge([left, right]).is_canonical());
        }
    }

    #[test]
    fn hash_bytes_distinguishes_trailing_chunks() {
        let mut rng = ChaChaRng::from_seed([1; 32]);
        let mut bytes = [0; 64];
        rng.fill(&mut bytes);

        let full = hash_bytes(&bytes);
        let truncated = hash_bytes(&bytes[..48]);

        assert_ne!(full, truncated);
        assert_ne!(hash_bytes(&[]), hash_bytes(&[0]));
    }
}
