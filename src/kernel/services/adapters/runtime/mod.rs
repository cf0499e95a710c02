//! Async runtime adapter: runs file IO and syntax checks off the UI thread
//! and sends messages back to it.

mod async_runtime;
mod message;

pub use async_runtime::AsyncRuntime;
pub use message::AppMessage;
