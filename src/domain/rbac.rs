//! RBAC (Role-Based Access Control) domain models
//!
//! Actions and resources form a closed vocabulary: permission grants stored
//! as free text in the database are parsed into these enums on load, and
//! anything outside the vocabulary is dropped with a warning rather than
//! silently widened into an evaluable grant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Action vocabulary for permission grants.
///
/// `Manage` implies the four CRUD actions on its resource; `All` paired
/// with `Resource::All` is the universal grant held only by the
/// platform-super tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Manage,
    Post,
    Chat,
    All,
}

impl Action {
    /// True for the four actions subsumed by `Manage`.
    pub fn is_crud(self) -> bool {
        matches!(
            self,
            Action::Create | Action::Read | Action::Update | Action::Delete
        )
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Action::Create => "CREATE",
            Action::Read => "READ",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
            Action::Manage => "MANAGE",
            Action::Post => "POST",
            Action::Chat => "CHAT",
            Action::All => "ALL",
        }
    }
}

impl FromStr for Action {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(Action::Create),
            "READ" => Ok(Action::Read),
            "UPDATE" => Ok(Action::Update),
            "DELETE" => Ok(Action::Delete),
            "MANAGE" => Ok(Action::Manage),
            "POST" => Ok(Action::Post),
            "CHAT" => Ok(Action::Chat),
            "ALL" => Ok(Action::All),
            _ => Err(UnknownToken(s.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Resource vocabulary identifying protected capability areas.
///
/// `Unclassified` is deliberately unreachable from `FromStr`: it marks
/// synthesized fallback rules whose derived token did not map into the
/// vocabulary, so no stored grant can ever name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Resource {
    LeadForm,
    User,
    Organization,
    Role,
    ChatMessage,
    Attachment,
    Billing,
    Report,
    Dashboard,
    Settings,
    All,
    Unclassified,
}

impl Resource {
    pub fn as_token(self) -> &'static str {
        match self {
            Resource::LeadForm => "LEAD_FORM",
            Resource::User => "USER",
            Resource::Organization => "ORGANIZATION",
            Resource::Role => "ROLE",
            Resource::ChatMessage => "CHAT_MESSAGE",
            Resource::Attachment => "ATTACHMENT",
            Resource::Billing => "BILLING",
            Resource::Report => "REPORT",
            Resource::Dashboard => "DASHBOARD",
            Resource::Settings => "SETTINGS",
            Resource::All => "ALL",
            Resource::Unclassified => "UNCLASSIFIED",
        }
    }

    /// Resources that guard administrative surfaces. The dynamic route
    /// fallback refuses to synthesize rules naming these.
    pub fn is_reserved(self) -> bool {
        matches!(
            self,
            Resource::Organization | Resource::Role | Resource::Billing | Resource::Settings
        )
    }
}

impl FromStr for Resource {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LEAD_FORM" => Ok(Resource::LeadForm),
            "USER" => Ok(Resource::User),
            "ORGANIZATION" => Ok(Resource::Organization),
            "ROLE" => Ok(Resource::Role),
            "CHAT_MESSAGE" => Ok(Resource::ChatMessage),
            "ATTACHMENT" => Ok(Resource::Attachment),
            "BILLING" => Ok(Resource::Billing),
            "REPORT" => Ok(Resource::Report),
            "DASHBOARD" => Ok(Resource::Dashboard),
            "SETTINGS" => Ok(Resource::Settings),
            "ALL" => Ok(Resource::All),
            _ => Err(UnknownToken(s.to_string())),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Error for tokens outside the fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToken(pub String);

impl fmt::Display for UnknownToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown vocabulary token: {}", self.0)
    }
}

impl std::error::Error for UnknownToken {}

/// A single (action, resource) permission grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub action: Action,
    pub resource: Resource,
}

impl PermissionGrant {
    pub fn new(action: Action, resource: Resource) -> Self {
        Self { action, resource }
    }
}

/// Role entity as stored, without its grants attached.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    pub id: Uuid,
    /// Name used for privilege-tier classification (matched by value).
    pub name: String,
    /// Organization the role belongs to; platform-tier roles have none.
    pub organization_id: Option<Uuid>,
    /// Marks roles operating across a class of resources (e.g. an agent tier).
    pub elevated: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role with its permission grants resolved from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleWithGrants {
    pub role: Role,
    pub grants: Vec<PermissionGrant>,
}
