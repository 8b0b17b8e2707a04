pub mod convert_flow;

pub use convert_flow::{ConvertFlow, ConvertReport};
