use thiserror::Error;

use crate::scene::{ComponentId, ObjectId};

/// Contract violations and lookups against the scene tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown object {0}")]
    UnknownObject(ObjectId),

    #[error("unknown component {0}")]
    UnknownComponent(ComponentId),

    #[error("no scene named {0:?}")]
    UnknownScene(String),

    #[error("{0} cannot be its own parent")]
    SelfParent(ObjectId),

    #[error("{0} is a scene and cannot have a parent")]
    SceneParent(ObjectId),

    #[error("parenting {child} under {parent} would create a cycle")]
    CyclicParent { child: ObjectId, parent: ObjectId },
}

pub type Result<T> = std::result::Result<T, EngineError>;
