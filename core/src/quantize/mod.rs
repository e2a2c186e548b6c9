pub mod quantizer;
pub mod width;

pub use quantizer::Quantizer;
pub use width::CodeWidth;
