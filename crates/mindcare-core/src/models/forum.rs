use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ForumPost {
    pub id: Uuid,
    pub author_id: String,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub anonymous: bool,
    pub replies: Vec<ForumReply>,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ForumReply {
    pub id: Uuid,
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    pub created_at: jiff::Timestamp,
}

impl ForumPost {
    /// The post as other users may see it: anonymous authors are masked.
    pub fn public_view(mut self) -> Self {
        if self.anonymous {
            self.author_id = String::new();
            self.author_name = ANONYMOUS.to_string();
        }
        self
    }
}
