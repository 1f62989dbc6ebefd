pub mod channel;
pub mod logging;
pub mod window;
