// src/index/authors.rs
//! Author display-name resolution.

use crate::model::AuthorProfile;
use std::collections::HashMap;

/// Maps actor ids to display information.
///
/// Ids missing from the returned map fall back to the raw id.
#[async_trait::async_trait]
pub trait AuthorResolver: Send + Sync {
    async fn resolve_authors(&self, ids: &[String]) -> HashMap<String, AuthorProfile>;
}

/// Uses each id as its own display name.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityAuthorResolver;

#[async_trait::async_trait]
impl AuthorResolver for IdentityAuthorResolver {
    async fn resolve_authors(&self, ids: &[String]) -> HashMap<String, AuthorProfile> {
        ids.iter()
            .map(|id| {
                (
                    id.clone(),
                    AuthorProfile {
                        display_name: id.clone(),
                    },
                )
            })
            .collect()
    }
}
