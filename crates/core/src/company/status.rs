use serde::{Deserialize, Serialize};

use super::types::Company;

/// Number of active and pending clients in a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientStatusCounts {
    pub active_clients: usize,
    pub pending_clients: usize,
}

impl ClientStatusCounts {
    /// Total number of companies counted.
    pub fn total(&self) -> usize {
        self.active_clients + self.pending_clients
    }
}

/// Counts companies by client status.
///
/// A company is active only when its `clientStatus` is `true`; everything
/// else, including a missing status, counts as pending.
pub fn count_client_statuses(companies: &[Company]) -> ClientStatusCounts {
    let active_clients = companies.iter().filter(|c| c.is_active_client()).count();

    ClientStatusCounts {
        active_clients,
        pending_clients: companies.len() - active_clients,
    }
}
