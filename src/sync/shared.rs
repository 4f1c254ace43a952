/*!
 * Shared Codec
 * Read-copy-update holder for a codec used from many threads
 */

use crate::codec::BitmaskCodec;
use arc_swap::ArcSwap;
use log::debug;
use std::sync::Arc;

/// Codec shared across threads with lock-free reads
///
/// Readers take an immutable snapshot and run `create`/`parse`/`can` on it
/// without any lock. Writers clone the current codec, apply a fallible edit
/// and swap it in; a failed edit leaves the published codec untouched.
///
/// # Example
///
/// ```
/// use permbits::codec::BitmaskCodec;
/// use permbits::sync::SharedCodec;
///
/// let shared = SharedCodec::new(BitmaskCodec::builder().permission("VIEW", 1).build()?);
/// shared.update(|codec| {
///     codec.register_group("DOCUMENTS", 1);
///     Ok::<_, permbits::core::RegistryError>(())
/// })?;
/// assert_eq!(shared.snapshot().registry().group_id("DOCUMENTS"), Some(1));
/// # Ok::<(), permbits::core::RegistryError>(())
/// ```
pub struct SharedCodec {
    inner: Arc<ArcSwap<BitmaskCodec>>,
}

impl SharedCodec {
    pub fn new(codec: BitmaskCodec) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(codec)),
        }
    }

    /// Current codec
    ///
    /// The snapshot stays valid and unchanged even if a writer publishes a
    /// new codec while it is held.
    #[inline]
    pub fn snapshot(&self) -> Arc<BitmaskCodec> {
        self.inner.load_full()
    }

    /// Clone-modify-swap
    ///
    /// `edit` may run more than once when writers race, so it should only
    /// touch the codec it is handed.
    pub fn update<F, T, E>(&self, mut edit: F) -> Result<T, E>
    where
        F: FnMut(&mut BitmaskCodec) -> Result<T, E>,
    {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let current = self.inner.load_full();
            let mut next = (*current).clone();
            let output = edit(&mut next)?;

            let previous = self.inner.compare_and_swap(&current, Arc::new(next));
            if Arc::ptr_eq(&*previous, &current) {
                if attempts > 1 {
                    debug!("Shared codec update committed after {} attempts", attempts);
                }
                return Ok(output);
            }
        }
    }

    /// Replace the codec entirely
    pub fn store(&self, codec: BitmaskCodec) {
        self.inner.store(Arc::new(codec));
    }
}

impl Clone for SharedCodec {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl From<BitmaskCodec> for SharedCodec {
    fn from(codec: BitmaskCodec) -> Self {
        Self::new(codec)
    }
}
