//! Try-on processor adapters.
//!
//! - [`ExternalProcessor`]: leaves the request for an out-of-process worker.
//! - [`PassthroughProcessor`]: publishes the user photo, re-encoded as PNG,
//!   as the result.

mod external;
mod passthrough;

pub use external::ExternalProcessor;
pub use passthrough::PassthroughProcessor;
