use thiserror::Error;

use crate::model::Node;

/// Errors surfaced by model construction, setters and driver runs.
///
/// The update engine itself never fails; everything here is caught at the
/// boundary before state is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IsingError {
    #[error("edge ({first}, {second}) is not in canonical order, expected the smaller node first")]
    NonCanonicalEdge { first: Node, second: Node },

    #[error("self-loop on node {0} is not allowed")]
    SelfLoop(Node),

    #[error("non-finite bias on {0}")]
    NonFiniteBias(String),

    #[error("model has no nodes")]
    EmptyModel,

    #[error("unknown node {0}")]
    UnknownNode(Node),

    #[error("invalid spin value {value} for node {node}, expected -1 or +1")]
    InvalidSpin { node: Node, value: i64 },

    #[error("flip trial rate must be a number, got {0}")]
    InvalidFlipTrialRate(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("interrupted")]
    Interrupted,

    #[error("{0}")]
    Parse(String),
}

impl From<validator::ValidationErrors> for IsingError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::InvalidConfig(format!("{e}"))
    }
}

pub type Result<T> = std::result::Result<T, IsingError>;
