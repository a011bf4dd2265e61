//! News service

use hub_common::Role;
use hub_core::entities::News;
use hub_core::value_objects::{ItemRef, ItemType};
use hub_core::{DomainError, EntityId};
use tracing::{info, instrument};

use crate::dto::{CreateNewsRequest, NewsResponse, UpdateNewsRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::require_admin;

/// News service
pub struct NewsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NewsService<'a> {
    /// Create a new NewsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All news, most recently published first
    #[instrument(skip(self))]
    pub async fn list_news(&self) -> ServiceResult<Vec<NewsResponse>> {
        let news = self.ctx.news_repo().list().await?;
        Ok(news.into_iter().map(NewsResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_news(&self, news_id: EntityId) -> ServiceResult<NewsResponse> {
        let news = self.require_news(news_id).await?;
        Ok(NewsResponse::from(news))
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_news(
        &self,
        role: Role,
        request: CreateNewsRequest,
    ) -> ServiceResult<NewsResponse> {
        require_admin(role, "publish news")?;

        let mut news = News::new(request.title, request.content, request.published_date);
        news.image_url = request.image_url;

        self.ctx.news_repo().create(&news).await?;

        info!(news_id = %news.id, "News published");

        Ok(NewsResponse::from(news))
    }

    #[instrument(skip(self, request))]
    pub async fn update_news(
        &self,
        role: Role,
        news_id: EntityId,
        request: UpdateNewsRequest,
    ) -> ServiceResult<NewsResponse> {
        require_admin(role, "update news")?;

        let mut news = self.require_news(news_id).await?;
        if let Some(title) = request.title {
            news.title = title;
        }
        if let Some(content) = request.content {
            news.content = content;
        }
        if let Some(published_date) = request.published_date {
            news.published_date = published_date;
        }
        if let Some(image_url) = request.image_url {
            news.image_url = image_url;
        }

        self.ctx.news_repo().update(&news).await?;

        info!(news_id = %news_id, "News updated");

        Ok(NewsResponse::from(news))
    }

    #[instrument(skip(self))]
    pub async fn delete_news(&self, role: Role, news_id: EntityId) -> ServiceResult<()> {
        require_admin(role, "delete news")?;

        self.ctx.news_repo().delete(news_id).await?;

        info!(news_id = %news_id, "News deleted");

        Ok(())
    }

    async fn require_news(&self, news_id: EntityId) -> ServiceResult<News> {
        self.ctx
            .news_repo()
            .find_by_id(news_id)
            .await?
            .ok_or_else(|| DomainError::ItemNotFound(ItemRef::new(news_id, ItemType::News)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::services::context::test_context;

    fn create_request(title: &str, published: NaiveDate) -> CreateNewsRequest {
        CreateNewsRequest {
            title: title.to_string(),
            content: "Body".to_string(),
            published_date: published,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_news_listed_newest_first() {
        let ctx = test_context();
        let service = NewsService::new(&ctx);
        for (title, day) in [("Old", 1), ("New", 20), ("Mid", 10)] {
            service
                .create_news(
                    Role::Admin,
                    create_request(title, NaiveDate::from_ymd_opt(2026, 3, day).unwrap()),
                )
                .await
                .unwrap();
        }

        let titles: Vec<String> = service
            .list_news()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["New", "Mid", "Old"]);
    }

    #[tokio::test]
    async fn test_clear_image() {
        let ctx = test_context();
        let service = NewsService::new(&ctx);
        let mut request = create_request("Garden", NaiveDate::from_ymd_opt(2026, 5, 2).unwrap());
        request.image_url = Some("https://example.org/garden.jpg".to_string());
        let created = service.create_news(Role::Admin, request).await.unwrap();

        let update = UpdateNewsRequest {
            image_url: Some(None),
            ..Default::default()
        };
        let updated = service
            .update_news(Role::Admin, created.id, update)
            .await
            .unwrap();
        assert!(updated.image_url.is_none());
        assert_eq!(updated.title, "Garden");
    }
}
