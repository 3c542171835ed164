//! Stable handles to objects owned by a [`Scene`](crate::Scene).
//!
//! The scene exclusively owns its entities, connections and grids. Everything
//! else refers to them through these lightweight `Copy` handles, which stay
//! valid for the lifetime of the scene because its collections are
//! append-only.

use std::fmt;

/// Handle to an [`Entity`](crate::entity::Entity) owned by a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

/// Handle to a [`Connection`](crate::connection::Connection) owned by a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(usize);

/// Handle to a [`Grid`](crate::grid::Grid) owned by a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridId(usize);

macro_rules! impl_handle {
    ($handle:ident, $prefix:literal) => {
        impl $handle {
            pub(crate) fn new(index: usize) -> Self {
                Self(index)
            }

            /// Returns the insertion index of the referenced object.
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $handle {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

impl_handle!(EntityId, "entity");
impl_handle!(ConnectionId, "connection");
impl_handle!(GridId, "grid");
