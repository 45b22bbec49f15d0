// extensions/mod.rs
//
// Cosmetic animation descriptors. Nothing in here affects game state: the
// composer hands tweens to the renderer and forgets about them.

pub mod easing;
pub mod tween;

pub use easing::Easing;
pub use tween::{Tween, TweenLoop, TweenTarget};
