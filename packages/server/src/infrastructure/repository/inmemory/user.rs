//! InMemory User Directory 実装

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{UserDirectory, UserId, UserProfile};

/// 起動時に投入されたプロフィールを保持する読み取り専用ディレクトリ
#[derive(Default)]
pub struct InMemoryUserDirectory {
    profiles: HashMap<UserId, UserProfile>,
}

impl InMemoryUserDirectory {
    pub fn new(profiles: Vec<UserProfile>) -> Self {
        Self {
            profiles: profiles
                .into_iter()
                .map(|profile| (profile.id.clone(), profile))
                .collect(),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_profile(&self, user_id: &UserId) -> Option<UserProfile> {
        self.profiles.get(user_id).cloned()
    }
}
