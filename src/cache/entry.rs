use std::{fmt, sync::Arc};

use futures::{
    FutureExt,
    future::{BoxFuture, Shared},
};
use tokio::sync::Mutex;

use crate::{
    content::PostId,
    error::{Error, Result},
};

/// 缓存键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// 完整文章列表
    Collection,
    /// 单篇文章
    Post(PostId),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Collection => f.write_str("blogs"),
            CacheKey::Post(id) => write!(f, "blog/{id}"),
        }
    }
}

type SharedFetch<T> = Shared<BoxFuture<'static, Result<Arc<T>>>>;

enum Slot<T> {
    Empty,
    Fresh(Arc<T>),
    /// 已失效，下次读取时重新拉取
    Stale,
    Pending(SharedFetch<T>),
}

/// 单个缓存键对应的状态
///
/// `generation` 在每次失效时递增；拉取完成时若代数已变化，
/// 结果仍交给等待者，但条目保持失效状态。
pub(super) struct Entry<T> {
    slot: Slot<T>,
    generation: u64,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            slot: Slot::Empty,
            generation: 0,
        }
    }
}

impl<T> Entry<T> {
    /// 没有缓存值也没有进行中的拉取
    pub(super) fn is_empty(&self) -> bool {
        matches!(self.slot, Slot::Empty)
    }

    pub(super) fn invalidate(&mut self) {
        self.generation += 1;
        if let Slot::Fresh(_) = self.slot {
            self.slot = Slot::Stale;
        }
    }

    fn settle(&mut self, key: CacheKey, generation: u64, result: &Result<Arc<T>>) {
        self.slot = match result {
            Ok(value) if self.generation == generation => Slot::Fresh(Arc::clone(value)),
            Ok(_) => {
                tracing::debug!(%key, "invalidated while fetching, keeping stale");
                Slot::Stale
            }
            // 失败不缓存，下次读取重新拉取
            Err(_) => Slot::Empty,
        };
    }
}

/// 读取缓存条目，未命中时拉取
///
/// 同一个键同时最多只有一个拉取任务。拉取在独立的任务中运行，
/// 调用方取消等待不会中断拉取，其他等待者仍能拿到结果。
pub(super) async fn load<T, F, Fut>(
    entry: &Arc<Mutex<Entry<T>>>,
    key: CacheKey,
    fetch: F,
) -> Result<Arc<T>>
where
    T: Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let pending = {
        let mut guard = entry.lock().await;
        let joined = match &guard.slot {
            Slot::Fresh(value) => {
                tracing::debug!(%key, "cache hit");
                return Ok(Arc::clone(value));
            }
            Slot::Pending(pending) => Some(pending.clone()),
            Slot::Empty | Slot::Stale => None,
        };

        match joined {
            Some(pending) => {
                tracing::debug!(%key, "joining in-flight fetch");
                pending
            }
            None => {
                tracing::debug!(%key, "cache miss, fetching");
                let generation = guard.generation;
                let pending = spawn_fetch(Arc::clone(entry), key, generation, fetch());
                guard.slot = Slot::Pending(pending.clone());
                pending
            }
        }
    };

    pending.await
}

fn spawn_fetch<T, Fut>(
    entry: Arc<Mutex<Entry<T>>>,
    key: CacheKey,
    generation: u64,
    fetch: Fut,
) -> SharedFetch<T>
where
    T: Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let task = tokio::spawn({
        let entry = Arc::clone(&entry);
        async move {
            let result = fetch.await.map(Arc::new);
            if let Err(e) = &result {
                tracing::warn!(%key, error = %e, "fetch failed");
            }
            entry.lock().await.settle(key, generation, &result);
            result
        }
    });

    async move {
        match task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(%key, error = %e, "fetch task aborted");
                let result = Err(Error::Aborted);
                entry.lock().await.settle(key, generation, &result);
                result
            }
        }
    }
    .boxed()
    .shared()
}
