use crate::core::discount::DiscountAnnotator;
use crate::core::{AfterRead, AllowAll, Authorizer, BookStore, Decision, ReadRequest, ReadResult};
use crate::domain::model::BOOKS_ENTITY;
use crate::utils::error::{BookshopError, Result};
use std::sync::Arc;

/// Books 目錄服務：授權檢查 → 讀取 → 讀取後 hooks
pub struct CatalogService {
    store: Arc<dyn BookStore>,
    authorizer: Arc<dyn Authorizer>,
    after_read: Vec<Arc<dyn AfterRead>>,
}

impl CatalogService {
    /// 預設放行所有讀取並掛上折扣 hook
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            store,
            authorizer: Arc::new(AllowAll),
            after_read: vec![Arc::new(DiscountAnnotator::new())],
        }
    }

    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = authorizer;
        self
    }

    /// 依註冊順序執行
    pub fn with_after_read(mut self, hook: Arc<dyn AfterRead>) -> Self {
        self.after_read.push(hook);
        self
    }

    pub fn without_after_read_hooks(mut self) -> Self {
        self.after_read.clear();
        self
    }

    /// 讀取整個 Books 集合；查詢參數一律忽略
    pub async fn read_books(&self, request: &ReadRequest) -> Result<ReadResult> {
        self.check_entity(request)?;
        self.check_access(request)?;

        if !request.query.is_empty() {
            tracing::debug!(
                "Ignoring query options on {}: {:?}",
                request.entity,
                request.query.keys().collect::<Vec<_>>()
            );
        }

        let books = self.store.select_all().await?;
        tracing::debug!("Read {} book(s) from store", books.len());

        Ok(self.run_after_read(ReadResult::Collection(books)))
    }

    /// 依 ID 讀取單筆
    pub async fn read_by_key(&self, request: &ReadRequest) -> Result<ReadResult> {
        self.check_entity(request)?;
        let key = request
            .key
            .as_ref()
            .ok_or_else(|| BookshopError::NotFound {
                entity: request.entity.clone(),
                key: "<none>".to_string(),
            })?;
        self.check_access(request)?;

        let book = self
            .store
            .select_by_key(key)
            .await?
            .ok_or_else(|| BookshopError::NotFound {
                entity: request.entity.clone(),
                key: key.to_string(),
            })?;

        Ok(self.run_after_read(ReadResult::Single(book)))
    }

    /// 依請求是否帶 key 分派
    pub async fn read(&self, request: &ReadRequest) -> Result<ReadResult> {
        if request.key.is_some() {
            self.read_by_key(request).await
        } else {
            self.read_books(request).await
        }
    }

    fn check_entity(&self, request: &ReadRequest) -> Result<()> {
        if request.entity != BOOKS_ENTITY {
            return Err(BookshopError::NotFound {
                entity: "Entity set".to_string(),
                key: request.entity.clone(),
            });
        }
        Ok(())
    }

    fn check_access(&self, request: &ReadRequest) -> Result<()> {
        match self.authorizer.authorize(request) {
            Decision::Allow => Ok(()),
            Decision::Deny(message) => {
                tracing::warn!(
                    "Read on {} rejected for {}: {}",
                    request.entity,
                    request.user.as_ref().map(|u| u.name.as_str()).unwrap_or("anonymous"),
                    message
                );
                match request.user {
                    None => Err(BookshopError::Unauthorized),
                    Some(_) => Err(BookshopError::Forbidden { message }),
                }
            }
        }
    }

    fn run_after_read(&self, result: ReadResult) -> ReadResult {
        self.after_read.iter().fold(result, |acc, hook| {
            tracing::trace!("Running after-read hook '{}'", hook.name());
            hook.after_read(acc)
        })
    }
}
