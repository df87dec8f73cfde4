use zk_primitives::{hash_bytes, Element};

use crate::{
    constants::TRANSCRIPT_DOMAIN, ConstraintError, JoinSplit, Proof, PublicOutput, Result,
};

/// Produces proofs for join-splits
///
/// Implementations must refuse to prove a join-split whose
/// [`public_output`](JoinSplit::public_output) fails
pub trait Prover {
    fn prove<const K: usize, const HEIGHT: usize>(
        &self,
        join_split: &JoinSplit<K, HEIGHT>,
    ) -> Result<Proof<K>>;
}

/// Checks that a proof is valid for the public output it carries
pub trait ProofVerifier {
    fn verify<const K: usize>(&self, proof: &Proof<K>) -> bool;
}

impl<const K: usize> Proof<K> {
    pub fn new(public_output: PublicOutput<K>, bytes: Vec<u8>) -> Self {
        Self {
            public_output,
            bytes,
        }
    }
}

impl<const K: usize> PublicOutput<K> {
    /// The public amount as a signed integer, if it is in range
    #[must_use]
    pub fn signed_public_amount(&self) -> Option<i128> {
        self.public_amount.to_signed()
    }

    fn transcript_tag(&self, domain: &[u8]) -> Result<Element> {
        let encoded = borsh::to_vec(self).map_err(|e| ConstraintError::Encoding(e.to_string()))?;

        let mut bytes = Vec::with_capacity(domain.len() + encoded.len());
        bytes.extend_from_slice(domain);
        bytes.extend_from_slice(&encoded);

        Ok(hash_bytes(&bytes))
    }
}

/// A prover that checks the constraints in the clear and tags the public output
///
/// The "proof" is a hash of the public output, so it reveals nothing the public output doesn't,
/// but it also proves nothing to anyone who doesn't trust the prover. It stands in for a real proof
/// system in tests and local tooling
///
/// ```rust
/// # use join_split::*;
/// # use imt::Path;
/// let mut rng = rand::thread_rng();
/// let spending_key = Element::secure_random(&mut rng);
///
/// let join_split = JoinSplit::<2, 8>::new(
///     [
///         InputNote::padding(spending_key, &mut rng),
///         InputNote::padding(spending_key, &mut rng),
///     ],
///     [
///         OutputNote::new(Note::padding(Element::ZERO, &mut rng), Path::empty()),
///         OutputNote::new(Note::padding(Element::ZERO, &mut rng), Path::empty()),
///     ],
///     imt::empty_tree_hash(8),
///     0,
///     TxKind::Transfer,
/// );
///
/// // the second output doesn't extend the root produced by the first
/// assert!(TranscriptProver::default().prove(&join_split).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TranscriptProver {
    domain: Vec<u8>,
}

impl Default for TranscriptProver {
    fn default() -> Self {
        Self::with_domain(TRANSCRIPT_DOMAIN)
    }
}

impl TranscriptProver {
    /// A prover whose tags only verify with a [`TranscriptVerifier`] using the same domain
    #[must_use]
    pub fn with_domain(domain: &[u8]) -> Self {
        Self {
            domain: domain.to_vec(),
        }
    }
}

impl Prover for TranscriptProver {
    fn prove<const K: usize, const HEIGHT: usize>(
        &self,
        join_split: &JoinSplit<K, HEIGHT>,
    ) -> Result<Proof<K>> {
        let public_output = join_split.public_output().map_err(|error| {
            tracing::debug!(%error, kind = %join_split.kind, "refusing to prove join-split");
            error
        })?;

        let tag = public_output.transcript_tag(&self.domain)?;

        Ok(Proof::new(public_output, tag.to_be_bytes().to_vec()))
    }
}

/// Verifies tags produced by [`TranscriptProver`]
#[derive(Debug, Clone)]
pub struct TranscriptVerifier {
    domain: Vec<u8>,
}

impl Default for TranscriptVerifier {
    fn default() -> Self {
        Self::with_domain(TRANSCRIPT_DOMAIN)
    }
}

impl TranscriptVerifier {
    #[must_use]
    pub fn with_domain(domain: &[u8]) -> Self {
        Self {
            domain: domain.to_vec(),
        }
    }
}

impl ProofVerifier for TranscriptVerifier {
    fn verify<const K: usize>(&self, proof: &Proof<K>) -> bool {
        match proof.public_output.transcript_tag(&self.domain) {
            Ok(tag) => proof.bytes == tag.to_be_bytes(),
            Err(error) => {
                tracing::warn!(%error, "could not encode public output");
                false
            }
        }
    }
}
