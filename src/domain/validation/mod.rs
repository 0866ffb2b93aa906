pub mod input_validator;

pub use input_validator::{InputValidator, REQUIRED_FIELDS, validate};
