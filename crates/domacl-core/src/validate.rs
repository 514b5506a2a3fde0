//! Cross-tier narrowing checks.
//!
//! A Mediator entry may only narrow its Master, and an Owner entry must pick
//! its single value from whichever tier bounds it (Mediator if present, else
//! Master). All checks are set membership; nothing here keeps state between
//! calls.

use std::collections::BTreeSet;

use crate::entry::{
    MasterAccessControlEntry, MasterRegistrationControlEntry, OwnerAccessControlEntry,
    OwnerRegistrationControlEntry, Permission, TrustLevel,
};

/// Entry shape of the Master and Mediator tiers: a default plus a possible set.
pub trait TierBounds {
    fn default_permission(&self) -> Permission;
    fn possible_permissions(&self) -> &BTreeSet<Permission>;
    fn default_trust_level(&self) -> TrustLevel;
    fn possible_trust_levels(&self) -> &BTreeSet<TrustLevel>;

    /// Whether the entry's defaults are members of its own possible sets.
    fn is_self_consistent(&self) -> bool {
        self.possible_permissions().contains(&self.default_permission())
            && self.possible_trust_levels().contains(&self.default_trust_level())
    }
}

/// Entry shape of the Owner tier: one concrete value per dimension.
pub trait TierGrant {
    fn permission(&self) -> Permission;
    fn trust_level(&self) -> TrustLevel;
}

/// Validator over one (Master, Mediator, Owner) triple.
///
/// Built fresh for every write from the entries currently in the stores plus
/// the proposed one.
#[derive(Debug)]
pub struct TierValidator<'a, M, O> {
    master: Option<&'a M>,
    mediator: Option<&'a M>,
    owner: Option<&'a O>,
}

pub type AceValidator<'a> = TierValidator<'a, MasterAccessControlEntry, OwnerAccessControlEntry>;
pub type RceValidator<'a> =
    TierValidator<'a, MasterRegistrationControlEntry, OwnerRegistrationControlEntry>;

impl<'a, M: TierBounds, O: TierGrant> TierValidator<'a, M, O> {
    pub fn new(master: Option<&'a M>, mediator: Option<&'a M>, owner: Option<&'a O>) -> Self {
        Self {
            master,
            mediator,
            owner,
        }
    }

    pub fn is_mediator_valid(&self) -> bool {
        self.mediator_violation().is_none()
    }

    pub fn is_owner_valid(&self) -> bool {
        self.owner_violation().is_none()
    }

    /// First reason the Mediator entry escapes its Master, if any.
    pub fn mediator_violation(&self) -> Option<&'static str> {
        let (Some(master), Some(mediator)) = (self.master, self.mediator) else {
            return None;
        };
        narrowing_violation(master, mediator)
    }

    /// First reason the Owner entry escapes its bounding tier, if any.
    pub fn owner_violation(&self) -> Option<&'static str> {
        if let Some(mediator) = self.mediator {
            if let Some(reason) = self.mediator_violation() {
                return Some(reason);
            }
            return owner_violation(mediator, self.owner);
        }
        match self.master {
            Some(master) => owner_violation(master, self.owner),
            None => None,
        }
    }
}

/// Whether `owner` picks its values from `bounding`'s possible sets.
/// An absent owner is trivially valid.
pub fn validate_owner<M: TierBounds, O: TierGrant>(bounding: &M, owner: Option<&O>) -> bool {
    owner_violation(bounding, owner).is_none()
}

fn narrowing_violation<M: TierBounds>(master: &M, mediator: &M) -> Option<&'static str> {
    let permissions = master.possible_permissions();
    if !permissions.contains(&mediator.default_permission()) {
        return Some("default permission outside master possible permissions");
    }
    if !mediator.possible_permissions().is_subset(permissions) {
        return Some("possible permissions not a subset of master possible permissions");
    }

    let trust_levels = master.possible_trust_levels();
    if !trust_levels.contains(&mediator.default_trust_level()) {
        return Some("default trust level outside master possible trust levels");
    }
    if !mediator.possible_trust_levels().is_subset(trust_levels) {
        return Some("possible trust levels not a subset of master possible trust levels");
    }
    None
}

fn owner_violation<M: TierBounds, O: TierGrant>(
    bounding: &M,
    owner: Option<&O>,
) -> Option<&'static str> {
    let owner = owner?;
    if !bounding.possible_permissions().contains(&owner.permission()) {
        return Some("owner permission outside bounding possible permissions");
    }
    if !bounding.possible_trust_levels().contains(&owner.trust_level()) {
        return Some("owner trust level outside bounding possible trust levels");
    }
    None
}

impl TierBounds for MasterAccessControlEntry {
    fn default_permission(&self) -> Permission {
        self.default_consumer_permission
    }
    fn possible_permissions(&self) -> &BTreeSet<Permission> {
        &self.possible_consumer_permissions
    }
    fn default_trust_level(&self) -> TrustLevel {
        self.default_required_trust_level
    }
    fn possible_trust_levels(&self) -> &BTreeSet<TrustLevel> {
        &self.possible_required_trust_levels
    }
}

impl TierBounds for MasterRegistrationControlEntry {
    fn default_permission(&self) -> Permission {
        self.default_provider_permission
    }
    fn possible_permissions(&self) -> &BTreeSet<Permission> {
        &self.possible_provider_permissions
    }
    fn default_trust_level(&self) -> TrustLevel {
        self.default_required_trust_level
    }
    fn possible_trust_levels(&self) -> &BTreeSet<TrustLevel> {
        &self.possible_required_trust_levels
    }
}

impl TierGrant for OwnerAccessControlEntry {
    fn permission(&self) -> Permission {
        self.consumer_permission
    }
    fn trust_level(&self) -> TrustLevel {
        self.required_trust_level
    }
}

impl TierGrant for OwnerRegistrationControlEntry {
    fn permission(&self) -> Permission {
        self.provider_permission
    }
    fn trust_level(&self) -> TrustLevel {
        self.required_trust_level
    }
}
