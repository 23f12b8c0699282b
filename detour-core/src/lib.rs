pub mod conf;
pub mod ctx;
pub mod device;
pub mod logging;
mod proxy;
pub mod rewrite;
pub mod server;
