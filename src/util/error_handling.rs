use std::{error::Error, fmt::Display};

use crate::network::{LinkId, NodeId};

pub type Result<T> = std::result::Result<T, SolverError>;

#[derive(Debug)]
pub enum SolverError {
    NetworkIOError(std::io::Error),
    NetworkSerializationError(serde_json::Error),
    ParseError {
        file: String,
        line: usize,
        message: String,
    },
    NetworkShapeError(String),

    UnknownNodeError(NodeId),
    UnknownLinkError(LinkId),
    InvalidCapacityError(LinkId, f64),
    InvalidLinkParameterError(LinkId, String),
    InvalidDemandError(NodeId, NodeId, f64),
    MissingFlowError(LinkId),

    UnreachableDestinationError(NodeId, NodeId),
    NegativeGapError(f64),
    EmptyLoadingError,
    InvalidOptionError(String),
}

impl Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SolverError::NetworkIOError(e) => format!("Failed to access network file: {e}."),
                SolverError::NetworkSerializationError(e) =>
                    format!("Failed to serialize the report: {e}."),
                SolverError::ParseError {
                    file,
                    line,
                    message,
                } => format!("Failed to parse {file} at line {line}: {message}."),
                SolverError::NetworkShapeError(e) => format!("Network is invalid: {e}."),
                SolverError::UnknownNodeError(n) =>
                    format!("Node {n} is not part of the network."),
                SolverError::UnknownLinkError(l) =>
                    format!("Link {l} is not part of the network."),
                SolverError::InvalidCapacityError(l, c) =>
                    format!("Link {l} has capacity {c}, but capacities must be positive."),
                SolverError::InvalidLinkParameterError(l, e) =>
                    format!("Link {l} is invalid: {e}."),
                SolverError::InvalidDemandError(o, d, v) =>
                    format!("OD pair ({o}->{d}) has demand {v}, but demand must be non-negative."),
                SolverError::MissingFlowError(l) => format!("No flow was given for link {l}."),
                SolverError::UnreachableDestinationError(o, d) =>
                    format!("Destination {d} cannot be reached from origin {o}."),
                SolverError::NegativeGapError(g) => format!(
                    "Relative gap evaluated to {g}, which is impossible for a feasible flow."
                ),
                SolverError::EmptyLoadingError =>
                    "The network carries no flow although demand is positive. Forgot to load?"
                        .to_owned(),
                SolverError::InvalidOptionError(e) => format!("Invalid solver option: {e}."),
            }
        )
    }
}

impl Error for SolverError {}

impl From<serde_json::Error> for SolverError {
    fn from(value: serde_json::Error) -> Self {
        SolverError::NetworkSerializationError(value)
    }
}

impl From<std::io::Error> for SolverError {
    fn from(value: std::io::Error) -> Self {
        SolverError::NetworkIOError(value)
    }
}
