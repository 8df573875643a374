// Downloader module - classification, request building and tool invocation

pub mod backends;
pub mod classifier;
pub mod errors;
pub mod models;
pub mod request;
pub mod tools;
pub mod traits;
pub mod utils;

pub use backends::YtDlpInvoker;
pub use classifier::{classify, UrlClass};
pub use errors::DownloadError;
pub use models::{DownloadRequest, InvocationResult};
pub use tools::{ToolInfo, ToolManager, ToolType};
pub use traits::{ToolInvoker, ToolMaintainer};
