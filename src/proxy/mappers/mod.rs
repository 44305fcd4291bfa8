// Mapper module - upstream payload wrapping/unwrapping

pub mod gemini;
