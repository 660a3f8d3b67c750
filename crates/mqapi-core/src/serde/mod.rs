//! JSON helpers with camelCase object keys.

mod pipeline;

pub use pipeline::{
    CamelCaseDecode, CamelCasePipeline, camel_case_keys, snake_case_keys, to_camel_case,
    to_snake_case,
};
