use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{NewTopic, Topic};
use crate::service::validation::required_str;
use crate::store::NewsStore;

pub struct TopicService;

impl TopicService {
    pub async fn list(store: &dyn NewsStore) -> Result<Vec<Topic>, AppError> {
        store.list_topics().await
    }

    /// Both fields are required. A duplicate slug is rejected by the store as a bad request.
    pub async fn create(store: &dyn NewsStore, body: JsonBody) -> Result<Topic, AppError> {
        let body = body.into_object()?;
        let new = NewTopic {
            slug: required_str(&body, "slug")?,
            description: required_str(&body, "description")?,
        };
        let topic = store.insert_topic(&new).await?;
        tracing::info!(slug = %topic.slug, "created topic");
        Ok(topic)
    }
}
