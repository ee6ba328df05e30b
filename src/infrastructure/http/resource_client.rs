use super::api_client::ApiClient;
use super::routes;
use crate::application::error::RemoteError;
use crate::application::ports::RemoteResourceClient;
use crate::domain::entities::Resource;
use crate::domain::value_objects::{DurableId, QueryKey};
use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// 一覧レスポンスは配列そのもの、または `{ "items": [...] }` / `{ "data": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse<R> {
    Bare(Vec<R>),
    Wrapped {
        #[serde(alias = "data")]
        items: Vec<R>,
    },
}

impl<R> ListResponse<R> {
    fn into_items(self) -> Vec<R> {
        match self {
            ListResponse::Bare(items) | ListResponse::Wrapped { items } => items,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReorderRequest<'a> {
    ordered_ids: &'a [DurableId],
}

/// REST API を使う [`RemoteResourceClient`] 実装
pub struct HttpResourceClient<R> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> HttpResourceClient<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Resource> RemoteResourceClient<R> for HttpResourceClient<R> {
    async fn list(&self, key: &QueryKey) -> Result<Vec<R>, RemoteError> {
        let segments = routes::collection_path(key)?;
        let request = self
            .api
            .request(Method::GET, &segments)
            .query(&routes::list_query(key));
        let body: ListResponse<R> = self.api.execute_json(request).await?;
        Ok(body.into_items())
    }

    async fn create(&self, key: &QueryKey, draft: &R::Draft) -> Result<R, RemoteError> {
        let segments = routes::collection_path(key)?;
        let request = self.api.request(Method::POST, &segments).json(draft);
        self.api.execute_json(request).await
    }

    async fn update(&self, id: &DurableId, patch: &R::Patch) -> Result<R, RemoteError> {
        let segments = routes::item_path(R::KIND, id);
        let request = self.api.request(Method::PATCH, &segments).json(patch);
        self.api.execute_json(request).await
    }

    async fn delete(&self, id: &DurableId) -> Result<(), RemoteError> {
        let segments = routes::item_path(R::KIND, id);
        self.api
            .execute(self.api.request(Method::DELETE, &segments))
            .await?;
        Ok(())
    }

    async fn reorder(&self, key: &QueryKey, ordered_ids: &[DurableId]) -> Result<(), RemoteError> {
        let segments = routes::reorder_path(key)?;
        let request = self
            .api
            .request(Method::PUT, &segments)
            .json(&ReorderRequest { ordered_ids });
        self.api.execute(request).await?;
        Ok(())
    }
}
