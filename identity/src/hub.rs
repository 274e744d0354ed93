//! Pluggable identity-verification hub.
//!
//! The registry does not know how womanhood is proven — only that the hub
//! validated a proof and extracted a disclosed attribute plus a nullifier.
//! Production deployments point this at the external zero-knowledge hub;
//! tests and local devnets use [`StubHub`].

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use womansplain_types::Nullifier;

use crate::error::IdentityError;

type Blake2b256 = Blake2b<U32>;

/// The attribute-verification policy forwarded to the hub alongside every
/// proof. The registry never enforces any of it locally.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationPolicy {
    /// Minimum age the proof must attest to.
    pub minimum_age: u32,
    /// ISO country codes the proof must not originate from.
    pub forbidden_countries: Vec<String>,
    /// Whether the hub should run its sanctions-list check.
    pub ofac_check: bool,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            minimum_age: 18,
            forbidden_countries: Vec::new(),
            ofac_check: false,
        }
    }
}

/// What a valid proof discloses to the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Disclosure {
    /// The disclosed gender attribute ("F", "M", ...).
    pub gender: String,
    /// One-way value identifying the underlying real-world identity.
    pub nullifier: Nullifier,
}

/// An external proof-verification oracle.
///
/// Implementations validate the opaque proof payload against their own
/// verification key material and, on success, return the disclosed
/// attributes. The registry trusts the result without re-verifying any
/// cryptography.
pub trait IdentityHub: Send + Sync {
    /// Human-readable name of this hub.
    fn name(&self) -> &str;

    /// Validate `proof` in `context` against `policy` and extract the
    /// disclosure. Errors with [`IdentityError::ProofRejected`] on any
    /// malformed or failing proof.
    fn verify(
        &self,
        proof: &[u8],
        context: &[u8],
        policy: &VerificationPolicy,
    ) -> Result<Disclosure, IdentityError>;
}

/// Deterministic hub for tests and local devnets.
///
/// Proof payloads are `"<gender>|<subject>"` in UTF-8. The nullifier is
/// `blake2b_256(scope ‖ 0x00 ‖ subject)`, so the same subject always maps to
/// the same nullifier within a scope and to a different one across scopes —
/// exactly the collision behavior the registry's sybil check needs, without
/// any real proof system behind it.
#[derive(Clone, Debug)]
pub struct StubHub {
    scope: String,
}

impl StubHub {
    pub fn new(scope: impl Into<String>) -> Self {
        Self { scope: scope.into() }
    }

    /// Build a stub proof payload for `gender` and `subject`.
    pub fn proof(gender: &str, subject: &str) -> Vec<u8> {
        format!("{gender}|{subject}").into_bytes()
    }

    fn derive_nullifier(&self, subject: &str) -> Nullifier {
        let mut hasher = Blake2b256::new();
        hasher.update(self.scope.as_bytes());
        hasher.update([0u8]);
        hasher.update(subject.as_bytes());
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        Nullifier::new(out)
    }
}

impl IdentityHub for StubHub {
    fn name(&self) -> &str {
        "stub"
    }

    fn verify(
        &self,
        proof: &[u8],
        _context: &[u8],
        _policy: &VerificationPolicy,
    ) -> Result<Disclosure, IdentityError> {
        let text = std::str::from_utf8(proof)
            .map_err(|_| IdentityError::ProofRejected("proof is not UTF-8".into()))?;

        let (gender, subject) = text
            .split_once('|')
            .ok_or_else(|| IdentityError::ProofRejected("missing gender|subject separator".into()))?;

        if gender.is_empty() || subject.is_empty() {
            return Err(IdentityError::ProofRejected("empty gender or subject".into()));
        }

        Ok(Disclosure {
            gender: gender.to_string(),
            nullifier: self.derive_nullifier(subject),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_subject_same_nullifier() {
        let hub = StubHub::new("womansplain");
        let policy = VerificationPolicy::default();
        let a = hub.verify(&StubHub::proof("F", "alice"), b"", &policy).unwrap();
        let b = hub.verify(&StubHub::proof("F", "alice"), b"", &policy).unwrap();
        assert_eq!(a.nullifier, b.nullifier);
    }

    #[test]
    fn different_subjects_differ() {
        let hub = StubHub::new("womansplain");
        let policy = VerificationPolicy::default();
        let a = hub.verify(&StubHub::proof("F", "alice"), b"", &policy).unwrap();
        let b = hub.verify(&StubHub::proof("F", "bobbi"), b"", &policy).unwrap();
        assert_ne!(a.nullifier, b.nullifier);
    }

    #[test]
    fn scope_namespaces_nullifiers() {
        let policy = VerificationPolicy::default();
        let a = StubHub::new("app-one")
            .verify(&StubHub::proof("F", "alice"), b"", &policy)
            .unwrap();
        let b = StubHub::new("app-two")
            .verify(&StubHub::proof("F", "alice"), b"", &policy)
            .unwrap();
        assert_ne!(a.nullifier, b.nullifier);
    }

    #[test]
    fn malformed_proofs_rejected() {
        let hub = StubHub::new("womansplain");
        let policy = VerificationPolicy::default();
        assert!(hub.verify(b"no-separator", b"", &policy).is_err());
        assert!(hub.verify(b"|subject-only", b"", &policy).is_err());
        assert!(hub.verify(&[0xff, 0xfe], b"", &policy).is_err());
    }
}
