//! Scene-object tree.
//!
//! [`SceneTree`] owns every [`GameObject`]; objects carry a [`Transform`], an
//! optional [`Behavior`] and an ordered list of [`Component`]s. Scenes are
//! root objects and the entry points of the per-frame traversal.

mod behavior;
mod component;
mod id;
mod object;
mod transform;
mod traverse;
mod tree;

pub use behavior::Behavior;
pub use component::{Component, ComponentSlot};
pub use id::{ComponentId, ObjectId};
pub use object::{GameObject, ObjectKind, Scene};
pub use transform::Transform;
pub use tree::SceneTree;

pub(crate) use traverse::traverse;
