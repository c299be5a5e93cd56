//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every generated entity has a strongly-typed ID so identifiers cannot be
//! mixed at compile time. IDs are built from caller-supplied random bytes
//! (RFC 4122 version 4 layout) rather than the clock, which keeps them part
//! of the reproducible output of a seeded generation run.

use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Build an identifier from 16 random bytes drawn by the caller.
            pub const fn from_random_bytes(bytes: [u8; 16]) -> Self {
                Self(Builder::from_random_bytes(bytes).into_uuid())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a generated galaxy.
    GalaxyId
}

define_id! {
    /// Unique identifier for a star system (node in the gate graph).
    SystemId
}

define_id! {
    /// Unique identifier for a celestial body.
    BodyId
}

define_id! {
    /// Unique identifier for a trading market.
    MarketId
}

define_id! {
    /// Unique identifier for a warp gate (edge in the gate graph).
    GateId
}

define_id! {
    /// Unique identifier for a cell of the sector grid.
    SectorId
}
