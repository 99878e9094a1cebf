//! Policy factory and registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::algorithm::Algorithm;
use crate::fcfs::Fcfs;
use crate::look::{CircularLook, Look};
use crate::policy::{CorePolicy, Policy, SchedError, SeekPolicy};
use crate::scan::{CircularScan, Scan};
use crate::sstf::Sstf;

/// Factory trait for resolving policies.
pub trait PolicyFactory: Send + Sync {
    /// Get or create the policy for an algorithm.
    fn policy(&self, algorithm: Algorithm) -> Arc<dyn Policy>;

    /// Get or create a policy by name (`fcfs`, `c-scan`, ...).
    fn get(&self, name: &str) -> Result<Arc<dyn Policy>, SchedError> {
        Ok(self.policy(name.parse()?))
    }

    /// List all available policy names, in reporting order.
    fn available(&self) -> Vec<&'static str> {
        Algorithm::ALL.iter().map(|a| a.name()).collect()
    }

    /// Every policy, in reporting order.
    fn all(&self) -> Vec<Arc<dyn Policy>> {
        Algorithm::ALL.iter().map(|&a| self.policy(a)).collect()
    }
}

/// Default factory with lazy creation and cache.
pub struct DefaultFactory {
    cache: RwLock<HashMap<Algorithm, Arc<dyn Policy>>>,
}

impl DefaultFactory {
    /// Create a new default factory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn create_policy(algorithm: Algorithm) -> Arc<dyn Policy> {
        let core: Arc<dyn CorePolicy> = match algorithm {
            Algorithm::Fcfs => Arc::new(Fcfs::new()),
            Algorithm::Sstf => Arc::new(Sstf::new()),
            Algorithm::Scan => Arc::new(Scan::new()),
            Algorithm::CScan => Arc::new(CircularScan::new()),
            Algorithm::Look => Arc::new(Look::new()),
            Algorithm::CLook => Arc::new(CircularLook::new()),
        };
        Arc::new(SeekPolicy::new(core))
    }
}

impl Default for DefaultFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyFactory for DefaultFactory {
    fn policy(&self, algorithm: Algorithm) -> Arc<dyn Policy> {
        if let Some(policy) = self.cache.read().get(&algorithm) {
            return Arc::clone(policy);
        }

        let policy = Self::create_policy(algorithm);
        self.cache.write().insert(algorithm, Arc::clone(&policy));
        policy
    }
}
