pub mod errors;
pub mod pipeline;
pub mod registry;
pub mod result;

use self::errors::DeviceError;
pub use self::result::DeviceResult;
use crate::ctx::{RequestCtx, ResponseCtx};

/// A trait representing a processing unit in the HTTP proxy pipeline.
///
/// Devices can intercept requests before they are proxied and observe or
/// modify responses before they reach the client. Each device must be both
/// Send and Sync: one instance serves all concurrently in-flight requests.
///
/// All methods provide default implementations that simply continue the
/// pipeline, allowing implementations to override only the hooks they care
/// about.
pub trait Device: Send + Sync {
    /// Called when a request is first received, before any proxying.
    fn on_request(&self, _ctx: &mut RequestCtx) -> DeviceResult {
        DeviceResult::Continue
    }

    /// Called just before the response is sent back to the client.
    fn on_response(&self, _ctx: &mut ResponseCtx) -> DeviceResult {
        DeviceResult::Continue
    }

    /// Called when an error occurs during request processing.
    fn on_error(&self, _err: &DeviceError) {}
}
