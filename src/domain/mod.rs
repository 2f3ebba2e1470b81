pub mod daily;
pub mod error;
pub mod weather;
pub mod window;
