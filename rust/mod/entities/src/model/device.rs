use std::collections::BTreeMap;

use bizmodel_macro::entity;
use bizmodel_types::Timestamp;

use super::geo::Coordinate;
use super::info::Info;
use super::state::DeviceState;

/// A device registered to an organization.
///
/// `firmware` and `last_seen_at` are reported by the device itself and are
/// never rewritten by normalization.
#[entity(module = "device", auditable, deletable)]
pub struct Device {
    pub id: Option<String>,
    pub serial_number: Option<String>,
    /// Hardware model reference.
    pub model: Option<Info>,
    #[property(owner)]
    pub organization_id: Option<String>,
    pub state: Option<DeviceState>,
    pub location: Option<Coordinate>,
    pub tags: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    #[property(read_only)]
    pub firmware: Option<String>,
    #[property(read_only)]
    pub last_seen_at: Option<Timestamp>,
}

impl Device {
    pub fn is_operational(&self) -> bool {
        matches!(self.state, Some(DeviceState::Active))
    }
}
