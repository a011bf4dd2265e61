//! Test fixtures and payload builders
//!
//! Request bodies are plain JSON values; responses deserialize into the
//! small structs below so tests read fields by name.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Admin login body
#[derive(Debug, Serialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

/// Session token response
#[derive(Debug, Deserialize)]
pub struct SessionBody {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub role: String,
}

/// Anything with an id
#[derive(Debug, Deserialize)]
pub struct Created {
    pub id: String,
}

/// Reaction counters as serialized by the API
#[derive(Debug, Deserialize, PartialEq, Eq, Default)]
pub struct Counts {
    pub like: u32,
    pub smile: u32,
    pub heart: u32,
    pub celebrate: u32,
}

/// Reaction toggle response
#[derive(Debug, Deserialize)]
pub struct ReactionBody {
    pub item_id: String,
    pub item_type: String,
    pub change: Value,
    pub reaction_type: Option<String>,
    pub reactions: Counts,
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub id: String,
    pub item_id: String,
    pub item_type: String,
    pub author: String,
    pub text: String,
    pub created_date: String,
    pub reactions: Counts,
}

pub fn family(name: &str) -> Value {
    json!({ "name": name })
}

pub fn member(name: &str, parent_id: Option<&str>) -> Value {
    json!({ "name": name, "parent_id": parent_id })
}

pub fn event(title: &str, event_date: &str) -> Value {
    json!({ "title": title, "description": "", "event_date": event_date })
}

pub fn news(title: &str, published_date: &str) -> Value {
    json!({ "title": title, "content": "", "published_date": published_date })
}

pub fn comment(item_type: &str, item_id: &str, author: &str, text: &str) -> Value {
    json!({ "item_type": item_type, "item_id": item_id, "author": author, "text": text })
}

pub fn reaction(item_type: &str, item_id: &str, reaction_type: &str) -> Value {
    json!({ "item_type": item_type, "item_id": item_id, "reaction_type": reaction_type })
}

pub fn item(item_type: &str, item_id: &str) -> Value {
    json!({ "item_type": item_type, "item_id": item_id })
}
