//! # hub-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, CommentService, EventService, FamilyService, NewsService, ReactionService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
