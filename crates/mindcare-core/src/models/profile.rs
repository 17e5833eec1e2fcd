use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::identity::Role;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Profile {
    /// The identity provider's subject id.
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub role: Role,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

/// Directory entry used as the escalation candidate pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Counsellor {
    pub id: String,
    pub name: String,
}

impl From<&Profile> for Counsellor {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
        }
    }
}

/// Build the counsellor directory from stored profiles.
///
/// Ordered by name, then id, so escalation always picks the same counsellor
/// for the same pool.
pub fn counsellor_directory(profiles: &[Profile]) -> Vec<Counsellor> {
    let mut counsellors: Vec<Counsellor> = profiles
        .iter()
        .filter(|p| p.role == Role::Counsellor)
        .map(Counsellor::from)
        .collect();
    counsellors.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    counsellors
}
