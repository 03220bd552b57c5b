//! Fixture loading for the in-memory stores.
//!
//! The relay does not own user or request records; in a standalone deployment
//! they are seeded from a JSON file shaped like:
//!
//! ```json
//! {
//!   "users": [{ "id": "u-amy", "name": "Amy", "email": "amy@example.com" }],
//!   "requests": [{ "id": "req-42", "ownerId": "u-amy", "assigneeId": null, "status": "open" }]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Conversation, DomainError, RequestStatus, RoomId, UserId, UserProfile};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixtures from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixtures: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid fixture record: {0}")]
    Invalid(#[from] DomainError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    #[serde(default)]
    pub users: Vec<UserFixture>,
    #[serde(default)]
    pub requests: Vec<RequestFixture>,
}

#[derive(Debug, Deserialize)]
pub struct UserFixture {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFixture {
    pub id: String,
    pub owner_id: String,
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
}

impl Fixtures {
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Validate every record and split into domain entities.
    pub fn into_parts(self) -> Result<(Vec<UserProfile>, Vec<Conversation>), FixtureError> {
        let users = self
            .users
            .into_iter()
            .map(|user| -> Result<UserProfile, DomainError> {
                Ok(UserProfile {
                    id: UserId::new(user.id)?,
                    name: user.name,
                    email: user.email,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let conversations = self
            .requests
            .into_iter()
            .map(|request| -> Result<Conversation, DomainError> {
                Ok(Conversation {
                    id: RoomId::new(request.id)?,
                    owner: UserId::new(request.owner_id)?,
                    assignee: request.assignee_id.map(UserId::new).transpose()?,
                    status: request.status,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok((users, conversations))
    }
}
