//! Content flags for collision trace filtering.
//!
//! Every brush in the world carries a set of content flags, and every trace
//! carries a mask. A trace only considers brushes whose contents intersect
//! its mask.

use serde::{Deserialize, Serialize};

/// Content flags describe what type of volume a brush is.
///
/// Used to filter traces - the vault sweeps only care about geometry that
/// blocks movement, while a trigger volume should never stop a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContentFlags(pub u32);

impl ContentFlags {
    /// Empty space - nothing here.
    pub const EMPTY: Self = Self(0);

    /// Solid world geometry - walls, floors, vaultable obstacles.
    pub const SOLID: Self = Self(1 << 0);

    /// Player clip - blocks characters but not probes.
    pub const PLAYER_CLIP: Self = Self(1 << 1);

    /// A character's own body brush.
    pub const PLAYER_BODY: Self = Self(1 << 2);

    /// Trigger volume - activates events when entered, never blocks.
    pub const TRIGGER: Self = Self(1 << 3);

    /// Camera-only blocker - occludes the camera boom, not the character.
    pub const CAMERA_CLIP: Self = Self(1 << 4);

    /// Mask for traversal sweeps and landing rays.
    ///
    /// Solid geometry plus character bodies: everything a vault probe should
    /// treat as a real surface.
    pub const MASK_VAULT: Self = Self(Self::SOLID.0 | Self::PLAYER_BODY.0);

    /// Mask for character movement collision.
    pub const MASK_CHARACTER: Self = Self(
        Self::SOLID.0 | Self::PLAYER_CLIP.0 | Self::PLAYER_BODY.0,
    );

    /// Check if these flags contain all of the given flags.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given flags are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Combine two flag sets.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for ContentFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for ContentFlags {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_operations() {
        let solid = ContentFlags::SOLID;
        let body = ContentFlags::PLAYER_BODY;
        let combined = solid | body;

        assert!(combined.contains(solid));
        assert!(combined.contains(body));
        assert!(!combined.contains(ContentFlags::TRIGGER));
        assert!(combined.intersects(solid));
    }

    #[test]
    fn test_vault_mask() {
        let mask = ContentFlags::MASK_VAULT;
        assert!(mask.contains(ContentFlags::SOLID));
        assert!(mask.contains(ContentFlags::PLAYER_BODY));
        assert!(!mask.intersects(ContentFlags::TRIGGER));
    }
}
