//! Capabilities a cache region exposes to the registry.

/// A single cache region with its own eviction policy.
///
/// The registry only ever needs to empty a region and, when the region
/// holds resources of its own, tear it down.
pub trait PolicyCache: Send + Sync {
    /// Remove every entry, keeping the region usable.
    fn clear(&self);

    /// Approximate number of live entries.
    fn entry_count(&self) -> u64;

    /// Disposal capability, if this region has one.
    fn as_disposable(&self) -> Option<&dyn Disposable> {
        None
    }
}

/// Release of resources held by a region.
///
/// Implementations must tolerate repeated calls.
pub trait Disposable: Send + Sync {
    fn dispose(&self);
}

/// Dispose `cache` when it exposes the capability; otherwise do nothing.
pub fn dispose_if_disposable<C>(cache: &C)
where
    C: PolicyCache + ?Sized,
{
    if let Some(disposable) = cache.as_disposable() {
        disposable.dispose();
    }
}
