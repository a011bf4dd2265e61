//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use hub_core::entities::{Comment, Event, Family, FamilyNode, News};

use super::responses::{
    CommentResponse, EventResponse, FamilyResponse, MemberResponse, NewsResponse,
};

// ============================================================================
// Family Mappers
// ============================================================================

impl From<&Family> for FamilyResponse {
    fn from(family: &Family) -> Self {
        Self {
            id: family.id,
            name: family.name.clone(),
            image_url: family.image_url.clone(),
            created_at: family.created_at,
        }
    }
}

impl From<Family> for FamilyResponse {
    fn from(family: Family) -> Self {
        Self {
            id: family.id,
            name: family.name,
            image_url: family.image_url,
            created_at: family.created_at,
        }
    }
}

impl From<&FamilyNode> for MemberResponse {
    fn from(node: &FamilyNode) -> Self {
        Self {
            id: node.id,
            family_id: node.family_id,
            name: node.name.clone(),
            image_url: node.image_url.clone(),
            birth_year: node.birth_year,
            note: node.note.clone(),
            parent_id: node.parent_id,
            father_id: node.father_id,
            mother_id: node.mother_id,
            created_at: node.created_at,
        }
    }
}

impl From<FamilyNode> for MemberResponse {
    fn from(node: FamilyNode) -> Self {
        Self::from(&node)
    }
}

// ============================================================================
// Event / News Mappers
// ============================================================================

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            event_date: event.event_date,
            location: event.location,
            image_url: event.image_url,
            reactions: event.reactions,
            created_at: event.created_at,
        }
    }
}

impl From<News> for NewsResponse {
    fn from(news: News) -> Self {
        Self {
            id: news.id,
            title: news.title,
            content: news.content,
            published_date: news.published_date,
            image_url: news.image_url,
            reactions: news.reactions,
            created_at: news.created_at,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            item_id: comment.item_id,
            item_type: comment.item_type,
            author: comment.author,
            text: comment.text,
            created_date: comment.created_date,
            reactions: comment.reactions,
        }
    }
}
