use indexmap::IndexMap;
use serde::Serialize;

use super::machine::Machine;

/// Health scores below this value put a machine at critical risk.
pub const CRITICAL_THRESHOLD: f64 = 50.0;

/// Alert raised ahead of any sensor warnings when a machine scores
/// below [`CRITICAL_THRESHOLD`].
pub const CRITICAL_ALERT: &str = "Critical Machine Failure Risk";

/// Scoring outcome for a single machine.
#[derive(Debug, Serialize)]
pub struct MachineHealth {
    pub health: f64,
    pub alerts: Vec<String>,
}

/// Registry of all machines in a run, scored in bulk.
///
/// Machines are kept in registration order so reports come out
/// deterministic run to run.
#[derive(Debug, Default)]
pub struct FactoryMonitor {
    machines: IndexMap<String, Machine>,
}

impl FactoryMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a machine under its id. Re-registering an id replaces
    /// the prior machine entirely, previously added sensors included.
    pub fn add_machine(&mut self, machine: Machine) {
        self.machines.insert(machine.id().to_string(), machine);
    }

    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    /// Scores every registered machine, in registration order.
    ///
    /// Each machine's alert list starts with [`CRITICAL_ALERT`] when its
    /// health is below [`CRITICAL_THRESHOLD`], followed by the offline
    /// warnings from scoring in their original order.
    pub fn check_machines(&self) -> IndexMap<String, MachineHealth> {
        let mut results = IndexMap::new();

        for (id, machine) in &self.machines {
            let (health, warnings) = machine.compute_health();

            let mut alerts = Vec::new();
            if health < CRITICAL_THRESHOLD {
                alerts.push(CRITICAL_ALERT.to_string());
            }
            alerts.extend(warnings);

            results.insert(id.clone(), MachineHealth { health, alerts });
        }

        results
    }
}
