//! Workload description: disk size, head position, travel direction and the
//! pending request queue.
//!
//! The text form is the positional encoding
//! `capacity head previous pending_1 ... pending_k`. A workload whose pending
//! list is empty is the sentinel that ends an evaluation session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::HEADER_FIELDS;
use crate::policy::SchedError;

/// Cylinder index on the simulated disk.
pub type Cylinder = u32;

/// Direction of head travel, inferred from `head` and `previous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Moving toward higher cylinders.
    Forward,
    /// Moving toward cylinder 0. Also used when the head has not moved.
    Backward,
}

/// One disk-access workload.
///
/// Immutable once handed to the harness; every worker evaluates the same
/// value through a shared read-only view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    /// One past the highest valid cylinder. The disk spans `[0, capacity - 1]`.
    pub capacity: Cylinder,
    /// Current head position.
    pub head: Cylinder,
    /// Head position before `head`, used only to infer direction.
    pub previous: Cylinder,
    /// Requests awaiting service. Duplicates allowed.
    pub pending: Vec<Cylinder>,
}

impl Workload {
    /// Create a workload. No range checks happen here; see [`Workload::validate`].
    #[must_use]
    pub fn new(capacity: Cylinder, head: Cylinder, previous: Cylinder, pending: Vec<Cylinder>) -> Self {
        Self {
            capacity,
            head,
            previous,
            pending,
        }
    }

    /// The termination sentinel: a workload with nothing pending.
    #[must_use]
    pub fn sentinel() -> Self {
        Self::new(0, 0, 0, Vec::new())
    }

    /// Build a workload from its positional encoding.
    pub fn from_values(values: &[Cylinder]) -> Result<Self, SchedError> {
        let [capacity, head, previous, pending @ ..] = values else {
            return Err(SchedError::MalformedWorkload(format!(
                "expected at least {HEADER_FIELDS} fields (capacity head previous), found {}",
                values.len()
            )));
        };
        Ok(Self::new(*capacity, *head, *previous, pending.to_vec()))
    }

    /// Whether this workload asks the session to terminate.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.pending.is_empty()
    }

    /// Highest addressable cylinder.
    #[must_use]
    pub fn edge(&self) -> Cylinder {
        self.capacity.saturating_sub(1)
    }

    /// Direction of travel. A head that has not moved counts as backward.
    #[must_use]
    pub fn direction(&self) -> Direction {
        if self.head > self.previous {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Lowest and highest pending cylinder, or `None` when nothing is pending.
    #[must_use]
    pub fn span(&self) -> Option<(Cylinder, Cylinder)> {
        let lo = self.pending.iter().copied().min()?;
        let hi = self.pending.iter().copied().max()?;
        Some((lo, hi))
    }

    /// Largest pending cylinder strictly below `cylinder`.
    #[must_use]
    pub fn nearest_below(&self, cylinder: Cylinder) -> Option<Cylinder> {
        self.pending.iter().copied().filter(|&c| c < cylinder).max()
    }

    /// Smallest pending cylinder strictly above `cylinder`.
    #[must_use]
    pub fn nearest_above(&self, cylinder: Cylinder) -> Option<Cylinder> {
        self.pending.iter().copied().filter(|&c| c > cylinder).min()
    }

    /// Check that every position lies on the disk.
    ///
    /// The sentinel is not special-cased here; callers test
    /// [`Workload::is_sentinel`] first.
    pub fn validate(&self) -> Result<(), SchedError> {
        if self.capacity == 0 {
            return Err(SchedError::MalformedWorkload(
                "capacity must be at least 1".into(),
            ));
        }
        let edge = self.edge();
        if self.head > edge {
            return Err(SchedError::MalformedWorkload(format!(
                "head {} outside [0, {edge}]",
                self.head
            )));
        }
        if self.previous > edge {
            return Err(SchedError::MalformedWorkload(format!(
                "previous position {} outside [0, {edge}]",
                self.previous
            )));
        }
        if let Some((i, c)) = self.pending.iter().enumerate().find(|&(_, &c)| c > edge) {
            return Err(SchedError::MalformedWorkload(format!(
                "pending request #{} ({c}) outside [0, {edge}]",
                i + 1
            )));
        }
        Ok(())
    }
}

impl FromStr for Workload {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .enumerate()
            .map(|(i, token)| {
                token.parse::<Cylinder>().map_err(|e| {
                    SchedError::MalformedWorkload(format!(
                        "field {} ({token:?}) is not a cylinder index: {e}",
                        i + 1
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_values(&values)
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.capacity, self.head, self.previous)?;
        for c in &self.pending {
            write!(f, " {c}")?;
        }
        Ok(())
    }
}
