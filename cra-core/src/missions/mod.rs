mod mission;
mod mission_registry;

pub use mission::{Mission, MissionId, MissionKind, NewMission};
pub use mission_registry::MissionRegistry;
