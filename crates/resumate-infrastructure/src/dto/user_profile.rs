//! UserProfile DTOs and migrations

use serde::{Deserialize, Serialize};
use serde_json::Value;
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use resumate_core::session::UserProfile;
use resumate_core::session::timestamp;

/// User profile V1.0.0: creation time kept exactly as the server sent it.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct UserProfileV1_0_0 {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Free-form: ISO string, epoch number, or date-time array.
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// User profile V2.0.0: creation time normalised to epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "2.0.0")]
#[serde(rename_all = "camelCase")]
pub struct UserProfileV2_0_0 {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

// ============================================================================
// Migration implementations
// ============================================================================

/// An undecodable creation time becomes `None`, which reads as expired.
impl MigratesTo<UserProfileV2_0_0> for UserProfileV1_0_0 {
    fn migrate(self) -> UserProfileV2_0_0 {
        UserProfileV2_0_0 {
            id: self.id,
            email: self.email,
            full_name: self.full_name,
            roles: self.roles,
            created_at: self.created_at.as_ref().and_then(timestamp::parse_millis),
            expires_in: self.expires_in,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl IntoDomain<UserProfile> for UserProfileV2_0_0 {
    fn into_domain(self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email,
            full_name: self.full_name,
            roles: self.roles,
            created_at: self.created_at,
            expires_in: self.expires_in,
        }
    }
}

impl FromDomain<UserProfile> for UserProfileV2_0_0 {
    fn from_domain(profile: UserProfile) -> Self {
        UserProfileV2_0_0 {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            roles: profile.roles,
            created_at: profile.created_at,
            expires_in: profile.expires_in,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a migrator for the persisted `user` document.
///
/// # Migration Path
///
/// - V1.0.0 → V2.0.0: Decodes `createdAt` into epoch milliseconds
/// - V2.0.0 → UserProfile: Converts DTO to domain model
pub fn create_user_profile_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!(
        "user_profile" => [UserProfileV1_0_0, UserProfileV2_0_0, UserProfile],
        save = true
    )
    .expect("Failed to create user_profile migrator")
}
