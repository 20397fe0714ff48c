use crate::core::{Authorizer, Decision, ReadRequest};

pub const DEFAULT_READ_ROLES: [&str; 2] = ["Admin", "Viewer"];
pub const NOT_AUTHORIZED: &str = "Not authorized";

/// 不做任何檢查，所有讀取都放行
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn authorize(&self, _request: &ReadRequest) -> Decision {
        Decision::Allow
    }
}

/// 使用者必須擁有任一指定角色
#[derive(Debug, Clone)]
pub struct RolePolicy {
    roles: Vec<String>,
}

impl RolePolicy {
    pub fn new(roles: Vec<String>) -> Self {
        Self { roles }
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}

impl Default for RolePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_READ_ROLES.iter().map(|r| r.to_string()).collect())
    }
}

impl Authorizer for RolePolicy {
    fn authorize(&self, request: &ReadRequest) -> Decision {
        match &request.user {
            Some(user) if self.roles.iter().any(|role| user.is(role)) => Decision::Allow,
            _ => Decision::Deny(NOT_AUTHORIZED.to_string()),
        }
    }
}
