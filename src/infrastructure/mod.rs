//! 基础设施层
//!
//! 持有浏览器与 HTTP 客户端等稀缺资源，只向上暴露能力

pub mod chrome_session;
pub mod js_executor;
pub mod page_fetcher;
pub mod viewer_session;

pub use chrome_session::ChromeSession;
pub use js_executor::JsExecutor;
pub use page_fetcher::{HttpFetcher, SourceFetcher};
pub use viewer_session::ViewerSession;
