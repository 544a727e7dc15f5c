#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use linvis_algebra as algebra;

#[doc(inline)]
pub use linvis_scene as scene;
