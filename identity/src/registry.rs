//! The identity registry — verification records, points, and badges.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use womansplain_types::{AccountAddress, Nullifier, ProtocolParams, Timestamp};

use crate::badges;
use crate::error::IdentityError;
use crate::event::DisclosureEvent;
use crate::hub::{IdentityHub, VerificationPolicy};
use crate::record::IdentityRecord;

/// The registry of verified identities, their points, and their badges.
///
/// Mutations are precondition-checked up front: a returned error means no
/// state changed. The hub is injected per call rather than owned, so the
/// registry itself stays serializable for snapshots.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdentityRegistry {
    /// Application scope seed, namespacing proofs to this deployment.
    scope_seed: String,
    /// Policy forwarded to the hub with every proof; never enforced locally.
    policy: VerificationPolicy,
    /// One record per address that has ever verified or earned points.
    records: HashMap<AccountAddress, IdentityRecord>,
    /// Reverse index enforcing global nullifier uniqueness.
    nullifier_index: HashMap<Nullifier, AccountAddress>,
    /// The single address allowed to call [`IdentityRegistry::award_points`].
    points_authority: Option<AccountAddress>,
    /// Disclosure events buffered for the host to drain.
    pending_events: Vec<DisclosureEvent>,
}

impl IdentityRegistry {
    /// Create a registry for one application deployment.
    ///
    /// `scope_seed` namespaces proofs to this application and is bounded at
    /// `params.max_scope_seed_len` bytes.
    pub fn new(
        scope_seed: impl Into<String>,
        policy: VerificationPolicy,
        params: &ProtocolParams,
    ) -> Result<Self, IdentityError> {
        let scope_seed = scope_seed.into();
        if scope_seed.len() > params.max_scope_seed_len {
            return Err(IdentityError::ScopeTooLong {
                len: scope_seed.len(),
                max: params.max_scope_seed_len,
            });
        }

        Ok(Self {
            scope_seed,
            policy,
            records: HashMap::new(),
            nullifier_index: HashMap::new(),
            points_authority: None,
            pending_events: Vec::new(),
        })
    }

    pub fn scope_seed(&self) -> &str {
        &self.scope_seed
    }

    pub fn policy(&self) -> &VerificationPolicy {
        &self.policy
    }

    /// Bind the one address allowed to award points (the question ledger).
    ///
    /// One-time: rebinding fails with [`IdentityError::AuthorityAlreadyBound`],
    /// so no later caller can redirect the capability.
    pub fn bind_points_authority(
        &mut self,
        authority: AccountAddress,
    ) -> Result<(), IdentityError> {
        if self.points_authority.is_some() {
            return Err(IdentityError::AuthorityAlreadyBound);
        }
        self.points_authority = Some(authority);
        Ok(())
    }

    /// Verify an identity proof for `caller` and record the disclosure.
    ///
    /// Fails with [`IdentityError::AlreadyVerified`] if the caller already
    /// holds a verified record, [`IdentityError::ProofRejected`] if the hub
    /// refuses the proof, and [`IdentityError::DuplicateIdentity`] if the
    /// extracted nullifier is already bound to any address. On success the
    /// record is created (or upgraded from a points-only record), the
    /// VERIFIED badge bit is set, and a [`DisclosureEvent`] is buffered.
    pub fn verify_proof(
        &mut self,
        caller: &AccountAddress,
        proof: &[u8],
        context: &[u8],
        hub: &dyn IdentityHub,
        now: Timestamp,
        params: &ProtocolParams,
    ) -> Result<(), IdentityError> {
        if self.records.get(caller).is_some_and(|r| r.verified) {
            return Err(IdentityError::AlreadyVerified(caller.to_string()));
        }

        let disclosure = hub.verify(proof, context, &self.policy)?;

        if self.nullifier_index.contains_key(&disclosure.nullifier) {
            return Err(IdentityError::DuplicateIdentity(
                disclosure.nullifier.to_string(),
            ));
        }

        let record = self
            .records
            .entry(caller.clone())
            .or_insert_with(|| IdentityRecord::unverified(caller.clone()));

        record.verified = true;
        record.disclosed_gender = Some(disclosure.gender.clone());
        record.nullifier = Some(disclosure.nullifier);
        record.verified_at = Some(now);
        record.badge_flags = badges::compute_badges(true, record.validation_points, params);

        self.nullifier_index
            .insert(disclosure.nullifier, caller.clone());

        self.pending_events.push(DisclosureEvent {
            user: caller.clone(),
            gender: disclosure.gender,
            timestamp: now,
            nullifier: disclosure.nullifier,
        });

        Ok(())
    }

    /// True iff the address holds a verified record disclosing gender "F".
    ///
    /// Unknown addresses are simply not verified women — never an error.
    pub fn is_verified_woman(&self, address: &AccountAddress) -> bool {
        self.records
            .get(address)
            .is_some_and(|r| r.verified && r.disclosed_gender.as_deref() == Some("F"))
    }

    /// Validation point balance; 0 for unknown addresses.
    pub fn validation_points(&self, address: &AccountAddress) -> u64 {
        self.records
            .get(address)
            .map_or(0, |r| r.validation_points)
    }

    /// Badge bitset; 0 for unknown addresses.
    pub fn user_badges(&self, address: &AccountAddress) -> u32 {
        self.records.get(address).map_or(0, |r| r.badge_flags)
    }

    /// Disclosed gender attribute; empty for unknown or undisclosed.
    pub fn user_gender(&self, address: &AccountAddress) -> String {
        self.records
            .get(address)
            .and_then(|r| r.disclosed_gender.clone())
            .unwrap_or_default()
    }

    /// Whether the address has disclosed a gender attribute.
    pub fn has_disclosed_gender(&self, address: &AccountAddress) -> bool {
        self.records
            .get(address)
            .is_some_and(|r| r.disclosed_gender.is_some())
    }

    /// Credit `amount` points to `recipient` and recompute their badges.
    ///
    /// Privileged: only the bound points authority may call this; any other
    /// caller fails with [`IdentityError::Unauthorized`] (including callers
    /// arriving before any authority is bound). Accumulation saturates, so
    /// the balance is monotone even at the u64 boundary. Returns the new
    /// balance.
    pub fn award_points(
        &mut self,
        caller: &AccountAddress,
        recipient: &AccountAddress,
        amount: u64,
        params: &ProtocolParams,
    ) -> Result<u64, IdentityError> {
        if self.points_authority.as_ref() != Some(caller) {
            return Err(IdentityError::Unauthorized(caller.to_string()));
        }

        let record = self
            .records
            .entry(recipient.clone())
            .or_insert_with(|| IdentityRecord::unverified(recipient.clone()));

        record.validation_points = record.validation_points.saturating_add(amount);
        record.badge_flags =
            badges::compute_badges(record.verified, record.validation_points, params);

        Ok(record.validation_points)
    }

    /// The full record for an address, if one exists.
    pub fn record(&self, address: &AccountAddress) -> Option<&IdentityRecord> {
        self.records.get(address)
    }

    /// Number of verified identity records.
    pub fn verified_count(&self) -> usize {
        self.records.values().filter(|r| r.verified).count()
    }

    /// Drain buffered disclosure events for the host to surface.
    pub fn drain_events(&mut self) -> Vec<DisclosureEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
