//! Named resources and image loading.

mod bitmap;
mod error;
mod manager;

pub use bitmap::ImageResource;
pub use error::ResourceError;
pub use manager::{Resource, ResourceManager};
