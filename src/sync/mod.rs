/*!
 * Sync Module
 * Sharing a codec between threads
 *
 * All codec operations are synchronous and lock-free on the read path;
 * schema mutation is serialized through read-copy-update.
 */

mod shared;

pub use shared::SharedCodec;
