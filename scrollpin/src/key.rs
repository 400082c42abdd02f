#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::Property;

#[cfg(feature = "std")]
pub(crate) type ChannelMap<K> = HashMap<(K, Property), usize>;
#[cfg(not(feature = "std"))]
pub(crate) type ChannelMap<K> = BTreeMap<(K, Property), usize>;

/// Identity of an animation target (an element the renderer owns).
///
/// With `std` this is `Hash + Eq + Clone`; without it, `Ord + Clone`.
#[cfg(feature = "std")]
pub trait TargetKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> TargetKey for K {}

#[cfg(not(feature = "std"))]
pub trait TargetKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> TargetKey for K {}
