//! Bearer token lookup against the users configured under `[auth]`.

use crate::config::toml_config::UserConfig;
use crate::domain::model::User;
use axum::http::{header, HeaderMap};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    by_token: HashMap<String, User>,
}

impl UserDirectory {
    pub fn from_config(users: &[UserConfig]) -> Self {
        let by_token = users
            .iter()
            .map(|u| (u.token.clone(), User::new(u.name.clone(), u.roles.clone())))
            .collect();
        Self { by_token }
    }

    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }

    /// 未帶 token 或 token 不認得都視為匿名
    pub fn resolve(&self, headers: &HeaderMap) -> Option<User> {
        let token = extract_bearer_token(headers)?;
        let user = self.by_token.get(token).cloned();
        if user.is_none() {
            tracing::warn!("Unknown bearer token presented; treating request as anonymous");
        }
        user
    }
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}
