use std::{fmt::Display, str::FromStr};

use crate::{Result, SolverError};

pub type NodeId = usize;

pub const DEFAULT_ALPHA: f64 = 0.15;
pub const DEFAULT_BETA: f64 = 4.0;

/// A link is identified by its ordered (tail, head) node pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId {
    pub tail: NodeId,
    pub head: NodeId,
}

impl LinkId {
    pub fn new(tail: NodeId, head: NodeId) -> Self {
        LinkId { tail, head }
    }
}

impl From<(NodeId, NodeId)> for LinkId {
    fn from(value: (NodeId, NodeId)) -> Self {
        LinkId::new(value.0, value.1)
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.tail, self.head)
    }
}

impl FromStr for LinkId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);
        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() != 2 {
            return Err(format!("link key \"{s}\" must have the form (tail,head)"));
        }
        let tail = parts[0]
            .trim()
            .parse::<NodeId>()
            .map_err(|_| format!("failed to parse tail node of \"{s}\""))?;
        let head = parts[1]
            .trim()
            .parse::<NodeId>()
            .map_err(|_| format!("failed to parse head node of \"{s}\""))?;
        Ok(LinkId::new(tail, head))
    }
}

/// A directed road link with a BPR volume-delay function.
///
/// `cost` is only refreshed by [`Link::update_cost`]; mutating `flow` or any of the structural
/// parameters leaves it stale until then.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: LinkId,
    pub free_flow_time: f64,
    pub capacity: f64,
    pub alpha: f64,
    pub beta: f64,
    pub toll: f64,
    pub flow: f64,
    pub cost: f64,
}

impl Link {
    pub fn new(tail: NodeId, head: NodeId, free_flow_time: f64, capacity: f64) -> Result<Self> {
        let mut link = Link {
            id: LinkId::new(tail, head),
            free_flow_time,
            capacity,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            toll: 0.0,
            flow: 0.0,
            cost: free_flow_time,
        };
        link.update_cost()?;
        Ok(link)
    }

    pub fn with_shape(mut self, alpha: f64, beta: f64) -> Result<Self> {
        self.alpha = alpha;
        self.beta = beta;
        self.update_cost()?;
        Ok(self)
    }

    pub fn with_toll(mut self, toll: f64) -> Result<Self> {
        self.toll = toll;
        self.update_cost()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.capacity.is_finite() && self.capacity > 0.0) {
            return Err(SolverError::InvalidCapacityError(self.id, self.capacity));
        }
        if !(self.free_flow_time.is_finite() && self.free_flow_time > 0.0) {
            return Err(SolverError::InvalidLinkParameterError(
                self.id,
                format!("free-flow time {} is not positive", self.free_flow_time),
            ));
        }
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(SolverError::InvalidLinkParameterError(
                self.id,
                format!("alpha {} is negative", self.alpha),
            ));
        }
        if !(self.beta.is_finite() && self.beta >= 0.0) {
            return Err(SolverError::InvalidLinkParameterError(
                self.id,
                format!("beta {} is negative", self.beta),
            ));
        }
        if !(self.toll.is_finite() && self.toll >= 0.0) {
            return Err(SolverError::InvalidLinkParameterError(
                self.id,
                format!("toll {} is negative", self.toll),
            ));
        }
        if !(self.flow.is_finite() && self.flow >= 0.0) {
            return Err(SolverError::InvalidLinkParameterError(
                self.id,
                format!("flow {} is negative", self.flow),
            ));
        }
        Ok(())
    }

    /// Recomputes `cost` from the current flow.
    pub fn update_cost(&mut self) -> Result<()> {
        self.validate()?;
        self.cost = self.cost_at(self.flow);
        Ok(())
    }

    /// Travel cost the link would have when carrying `flow`.
    pub fn cost_at(&self, flow: f64) -> f64 {
        self.free_flow_time * (1.0 + self.alpha * (flow / self.capacity).powf(self.beta))
            + self.toll
    }

    /// Integral of the cost function from zero to `flow`, i.e. this link's contribution to the
    /// Beckmann objective.
    pub fn cost_integral_at(&self, flow: f64) -> f64 {
        self.free_flow_time
            * (flow
                + self.alpha * self.capacity / (self.beta + 1.0)
                    * (flow / self.capacity).powf(self.beta + 1.0))
            + self.toll * flow
    }

    pub fn utilisation(&self) -> f64 {
        self.flow / self.capacity
    }
}
