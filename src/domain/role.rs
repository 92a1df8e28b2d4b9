use serde::{Deserialize, Serialize};

/// Business meaning of a role, resolved once when roles are loaded.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    /// Merchant-style role: payments made by the holder leave its balance unchanged.
    FeeExempt,
    /// Customer role: payments debit the holder.
    Standard,
    #[default]
    Unclassified,
}

/// Maps provisioned role ids to their [`RoleKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolePolicy {
    pub fee_exempt_role_id: String,
    pub standard_role_id: String,
}

impl Default for RolePolicy {
    fn default() -> Self {
        Self {
            fee_exempt_role_id: "1".to_string(),
            standard_role_id: "2".to_string(),
        }
    }
}

impl RolePolicy {
    pub fn classify(&self, role_id: &str) -> RoleKind {
        if role_id == self.fee_exempt_role_id {
            RoleKind::FeeExempt
        } else if role_id == self.standard_role_id {
            RoleKind::Standard
        } else {
            RoleKind::Unclassified
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub is_default: bool,
    #[serde(skip, default)]
    pub kind: RoleKind,
}

impl Role {
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_default: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_default,
            kind: RoleKind::Unclassified,
        }
    }
}

/// Join record linking an account to one of its roles.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct AccountRole {
    pub id: String,
    pub account_id: String,
    pub role_id: String,
}

/// Roles seeded by `init` when no roles snapshot exists yet.
pub fn default_roles() -> Vec<Role> {
    vec![
        Role::new("1", "merchant", false),
        Role::new("2", "customer", true),
    ]
}
