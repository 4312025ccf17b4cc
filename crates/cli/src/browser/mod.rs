pub mod js;
pub mod session;

pub use session::BrowserSession;
