use serde::{Deserialize, Serialize};

/// Decision an entry grants to a consumer or provider.
///
/// `Ord` exists only so values can live in a `BTreeSet`; validation never
/// compares permissions ordinally, only by set membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Permission {
    Yes,
    Ask,
    No,
}

/// Trust level a caller must present.
///
/// Same note as [`Permission`]: the derived order is for set storage only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrustLevel {
    High,
    Mid,
    Low,
}
