//! Policy identities and per-policy results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::POLICY_COUNT;
use crate::policy::SchedError;

/// Identity of a scheduling policy.
///
/// The declaration order is the order results are always reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "FCFS")]
    Fcfs,
    #[serde(rename = "SSTF")]
    Sstf,
    #[serde(rename = "SCAN")]
    Scan,
    #[serde(rename = "C-SCAN")]
    CScan,
    #[serde(rename = "LOOK")]
    Look,
    #[serde(rename = "C-LOOK")]
    CLook,
}

impl Algorithm {
    /// Every policy, in reporting order.
    pub const ALL: [Algorithm; POLICY_COUNT] = [
        Algorithm::Fcfs,
        Algorithm::Sstf,
        Algorithm::Scan,
        Algorithm::CScan,
        Algorithm::Look,
        Algorithm::CLook,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sstf => "SSTF",
            Algorithm::Scan => "SCAN",
            Algorithm::CScan => "C-SCAN",
            Algorithm::Look => "LOOK",
            Algorithm::CLook => "C-LOOK",
        }
    }

    /// Position in [`Algorithm::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Algorithm::Fcfs),
            "sstf" => Ok(Algorithm::Sstf),
            "scan" => Ok(Algorithm::Scan),
            "c-scan" | "cscan" => Ok(Algorithm::CScan),
            "look" => Ok(Algorithm::Look),
            "c-look" | "clook" => Ok(Algorithm::CLook),
            _ => Err(SchedError::Config(format!("unknown policy: {s}"))),
        }
    }
}

/// Total head movement computed by one policy for one workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    /// Policy that produced the value.
    pub algorithm: Algorithm,
    /// Total cylinders traversed.
    pub steps: u64,
}

impl AlgorithmResult {
    #[must_use]
    pub fn new(algorithm: Algorithm, steps: u64) -> Self {
        Self { algorithm, steps }
    }
}
