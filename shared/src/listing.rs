//! 列表管理模块 - 核心引擎
//!
//! 每个资源屏幕都重复同一套交互：拉取集合 → 本地筛选 → 本地分页 →
//! 变更 → 重新拉取。这里把这套交互实现一次，屏幕只负责提供客户端
//! 适配器和渲染。
//!
//! 两条刻意保留的约定：
//! - 本地集合是快照：变更成功后整体重拉，不做局部拼接，避免本地与
//!   服务端状态漂移。
//! - 拉取失败保留上一次成功的数据，错误单独展示，不清空界面。

use crate::date::{DateRange, Timestamp};
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::Rc;

/// 参考行为固定每页 10 条
pub const DEFAULT_PAGE_SIZE: usize = 10;

// =========================================================
// 查询状态（每屏独立，随屏幕卸载丢弃，从不持久化）
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    /// 大小写不敏感的子串搜索，作用于指定的展示字段
    pub search: String,
    pub date_range: Option<DateRange>,
    /// 从 1 开始
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            date_range: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// 子串匹配，大小写不敏感；空搜索词匹配一切
pub fn matches_search(needle: &str, haystack: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// 总页数 = ceil(count / size)，空集合也显示 1 页
pub fn total_pages(filtered_count: usize, page_size: usize) -> usize {
    if filtered_count == 0 {
        1
    } else {
        filtered_count.div_ceil(page_size)
    }
}

/// 把页码夹进 `[1, total]`
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.max(1).min(total.max(1))
}

/// 当前页的可见切片及分页元数据
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub filtered_total: usize,
}

// =========================================================
// ListStore - 单个屏幕的集合快照与查询状态
// =========================================================

/// 一个资源屏幕的全部本地状态
///
/// `items` 是服务端集合的快照，只会被整体替换（拉取成功）或原样
/// 保留（拉取失败），绝不被局部修改。
#[derive(Debug, Clone)]
pub struct ListStore<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    query: ListQuery,
    /// 待确认的删除目标，每屏同一时刻至多一个
    pending_delete: Option<T>,
    search_key: fn(&T) -> &str,
    date_key: Option<fn(&T) -> Option<Timestamp>>,
}

impl<T: Clone> ListStore<T> {
    /// `search_key` 指定搜索作用的展示字段
    pub fn new(search_key: fn(&T) -> &str) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            query: ListQuery::default(),
            pending_delete: None,
            search_key,
            date_key: None,
        }
    }

    /// 启用日期窗口筛选，`date_key` 给出每条记录的时间戳
    pub fn with_date_key(mut self, date_key: fn(&T) -> Option<Timestamp>) -> Self {
        self.date_key = Some(date_key);
        self
    }

    // --- 拉取生命周期 ---

    /// 标记一次拉取开始；已有拉取在途时返回 false（同屏至多一个在途）
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// 拉取成功：整体替换快照，清掉错误，页码夹回有效范围
    pub fn apply_fetch_ok(&mut self, items: Vec<T>) {
        self.items = items;
        self.loading = false;
        self.error = None;
        let total = total_pages(self.filtered().len(), self.query.page_size);
        self.query.page = clamp_page(self.query.page, total);
    }

    /// 拉取失败：上一次成功的数据原样保留，错误单独记录
    pub fn apply_fetch_err(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    // --- 查询变更 ---

    /// 改搜索词。只有当前页会因此越界时才回到第 1 页
    pub fn set_search(&mut self, search: String) {
        self.query.search = search;
        self.reset_page_if_out_of_range();
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.query.date_range = match range {
            Some(r) if r.is_unbounded() => None,
            other => other,
        };
        self.reset_page_if_out_of_range();
    }

    pub fn set_page(&mut self, page: usize) {
        let total = total_pages(self.filtered().len(), self.query.page_size);
        self.query.page = clamp_page(page, total);
    }

    fn reset_page_if_out_of_range(&mut self) {
        let total = total_pages(self.filtered().len(), self.query.page_size);
        if self.query.page > total {
            self.query.page = 1;
        }
    }

    // --- 删除确认 ---

    /// 选中一条记录等待确认。重复调用覆盖旧目标（至多一个）
    pub fn request_delete(&mut self, record: T) {
        self.pending_delete = Some(record);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// 取走已确认的目标；没有待确认目标时返回 None
    pub fn take_confirmed(&mut self) -> Option<T> {
        self.pending_delete.take()
    }

    /// 删除请求失败后放回目标，确认框保持打开供用户重试或取消
    pub fn restore_pending(&mut self, record: T) {
        self.pending_delete = Some(record);
    }

    pub fn pending_delete(&self) -> Option<&T> {
        self.pending_delete.as_ref()
    }

    // --- 读取 ---

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// 应用搜索词和日期窗口后的记录
    pub fn filtered(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| matches_search(&self.query.search, (self.search_key)(item)))
            .filter(|item| match (&self.query.date_range, self.date_key) {
                (Some(range), Some(date_key)) => {
                    date_key(item).is_some_and(|ts| range.contains(ts))
                }
                _ => true,
            })
            .collect()
    }

    /// 当前页的可见切片
    pub fn visible(&self) -> PageView<T> {
        let filtered = self.filtered();
        let filtered_total = filtered.len();
        let total = total_pages(filtered_total, self.query.page_size);
        let page = clamp_page(self.query.page, total);
        let start = (page - 1) * self.query.page_size;
        let items = filtered
            .into_iter()
            .skip(start)
            .take(self.query.page_size)
            .cloned()
            .collect::<Vec<_>>();
        PageView {
            items,
            page,
            total_pages: total,
            filtered_total,
        }
    }
}

// =========================================================
// 客户端抽象与拉取/变更流程
// =========================================================

/// 一个资源集合的最小后端接口
///
/// `(?Send)` 因为 WASM 环境下的 future 不是 Send 的。
#[async_trait(?Send)]
pub trait CollectionClient<T> {
    /// 拉取集合。支持服务端筛选的端点可以转发 `query` 中的参数，
    /// 其余端点忽略之、由本地筛选兜底。
    async fn fetch(&self, query: &ListQuery) -> ApiResult<Vec<T>>;

    /// 按 id 删除单条记录。只读集合不用实现。
    async fn delete(&self, _id: &str) -> ApiResult<()> {
        Err(ApiError::server(405, "collection is read-only"))
    }
}

/// 确认删除流程的结果
#[derive(Debug, PartialEq)]
pub enum DeleteOutcome {
    /// 没有待确认目标，什么都没发生
    NothingPending,
    /// 删除成功且已重拉
    Deleted,
    /// 删除失败，目标已放回待确认位
    Failed(ApiError),
}

/// 把 [`ListStore`] 与后端客户端绑在一起的会话对象
///
/// store 放在 `Rc<RefCell<..>>` 里，前端可以在信号层共享同一份
/// 状态；借用只在同步段持有，从不跨越 await 点。
pub struct ListSession<T, C> {
    store: Rc<RefCell<ListStore<T>>>,
    client: C,
    id_key: fn(&T) -> &str,
}

impl<T, C: Clone> Clone for ListSession<T, C> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
            client: self.client.clone(),
            id_key: self.id_key,
        }
    }
}

impl<T: Clone, C: CollectionClient<T>> ListSession<T, C> {
    pub fn new(client: C, store: ListStore<T>, id_key: fn(&T) -> &str) -> Self {
        Self {
            store: Rc::new(RefCell::new(store)),
            client,
            id_key,
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&ListStore<T>) -> R) -> R {
        f(&self.store.borrow())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut ListStore<T>) -> R) -> R {
        f(&mut self.store.borrow_mut())
    }

    /// 标记拉取开始；返回 false 表示已有拉取在途
    pub fn begin_load(&self) -> bool {
        self.update(|s| s.begin_load())
    }

    /// 完成一次已开始的拉取（查询参数取快照后再发请求）
    pub async fn finish_load(&self) {
        let query = self.with(|s| s.query().clone());
        match self.client.fetch(&query).await {
            Ok(items) => self.update(|s| s.apply_fetch_ok(items)),
            Err(e) => self.update(|s| s.apply_fetch_err(e.to_string())),
        }
    }

    /// 一次完整拉取；在途时静默跳过
    pub async fn load(&self) {
        if self.begin_load() {
            self.finish_load().await;
        }
    }

    /// 确认删除：发一次删除请求，成功后恰好重拉一次。
    /// 失败时把目标放回待确认位（确认框保持打开），集合不动。
    pub async fn delete_confirmed(&self) -> DeleteOutcome {
        let Some(target) = self.update(|s| s.take_confirmed()) else {
            return DeleteOutcome::NothingPending;
        };
        let id = (self.id_key)(&target).to_string();
        match self.client.delete(&id).await {
            Ok(()) => {
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                self.update(|s| s.restore_pending(target));
                DeleteOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests;
