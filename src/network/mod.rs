mod display;
mod export;
mod flows;
mod link;
mod metrics;
mod network;
mod od_pair;
mod policy;
mod tntp;

pub use export::AssignmentReport;
pub use flows::{parse_flows, read_flows_file, write_flows_file, FlowMap};
pub use link::{Link, LinkId, NodeId, DEFAULT_ALPHA, DEFAULT_BETA};
pub use metrics::Metrics;
pub use network::*;
pub use od_pair::OdPair;
