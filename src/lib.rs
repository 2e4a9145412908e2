#[macro_use]
extern crate tracing;

mod app;
mod feed;
mod logging;

pub use app::App;
pub use feed::Feed;
pub use logging::init_logging;
