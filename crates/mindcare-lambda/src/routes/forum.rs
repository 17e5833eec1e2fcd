use axum::extract::State;
use axum::Extension;
use jiff::Timestamp;
use serde::Deserialize;
use uuid::Uuid;

use mindcare_core::keys;
use mindcare_core::models::forum::{ForumPost, ForumReply};
use mindcare_core::models::identity::Identity;
use mindcare_core::models::profile::Profile;
use mindcare_storage::Store;

use crate::error::ApiError;
use crate::extract::{Json, Path};
use crate::routes::required_text;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub anonymous: bool,
}

#[derive(Deserialize)]
pub struct ReplyRequest {
    pub content: String,
}

/// Name shown next to the caller's posts: profile name, else email, else id.
async fn display_name(store: &Store, identity: &Identity) -> Result<String, ApiError> {
    let profile: Option<Profile> = store.get_json(&keys::profile(&identity.subject_id)).await?;
    Ok(profile
        .map(|p| p.name)
        .or_else(|| identity.email.clone())
        .unwrap_or_else(|| identity.subject_id.clone()))
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreatePostRequest>,
) -> Result<Json<ForumPost>, ApiError> {
    let title = required_text("title", &req.title)?;
    let content = required_text("content", &req.content)?;

    let post = ForumPost {
        id: Uuid::new_v4(),
        author_id: identity.subject_id.clone(),
        author_name: display_name(&state.store, &identity).await?,
        title,
        content,
        anonymous: req.anonymous,
        replies: Vec::new(),
        created_at: Timestamp::now(),
    };
    state
        .store
        .put_json(&keys::forum_post(post.id), &post)
        .await?;

    Ok(Json(post.public_view()))
}

/// Every post, newest first.
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<ForumPost>>, ApiError> {
    let mut posts: Vec<ForumPost> = state.store.list_json(keys::FORUM_PREFIX).await?;
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(posts.into_iter().map(ForumPost::public_view).collect()))
}

pub async fn reply_to_post(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReplyRequest>,
) -> Result<Json<ForumPost>, ApiError> {
    let content = required_text("content", &req.content)?;
    let key = keys::forum_post(id);

    let existing: ForumPost = state
        .store
        .get_json(&key)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("forum post not found: {id}")))?;

    let reply = ForumReply {
        id: Uuid::new_v4(),
        author_id: identity.subject_id.clone(),
        author_name: display_name(&state.store, &identity).await?,
        content,
        created_at: Timestamp::now(),
    };

    // Concurrent replies to one post must not overwrite each other.
    let post = state
        .store
        .update_json(
            &key,
            || existing.clone(),
            |post: &mut ForumPost| post.replies.push(reply.clone()),
        )
        .await?;

    Ok(Json(post.public_view()))
}
