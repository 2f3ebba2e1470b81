pub mod pipeline;
pub mod settings;
pub mod source;
