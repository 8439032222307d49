use thiserror::Error;

use super::graph::NodeClass;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("link {link} references {class} index {index}, but only {len} {class} labels exist")]
    IndexOutOfBounds {
        link: usize,
        class: NodeClass,
        index: usize,
        len: usize,
    },

    #[error("link {link} has invalid value {value}; link values must be finite and non-negative")]
    InvalidValue { link: usize, value: f64 },
}

pub type Result<T> = std::result::Result<T, GraphError>;
