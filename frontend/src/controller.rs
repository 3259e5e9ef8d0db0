//! 列表控制器模块
//!
//! 把 `classdesk_shared::listing` 的会话对象接到 Leptos 信号上。
//! 每个资源屏幕实例化一个控制器（提供客户端适配器 + 展示字段），
//! 拉取/筛选/分页/删除确认的交互从此只写一遍。
//!
//! store 本身不是信号；控制器用一个版本号信号驱动重渲染：
//! 每次状态变化后 `touch()` 一下，`read()` 里订阅版本号。

use classdesk_shared::date::DateRange;
use classdesk_shared::listing::{
    CollectionClient, DeleteOutcome, ListSession, ListStore, PageView,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub struct ListController<T: 'static, C: 'static> {
    /// `ListSession` 里有 Rc，不是 Send 的，用线程本地存储
    session: StoredValue<ListSession<T, C>, LocalStorage>,
    version: RwSignal<u32>,
    /// 变更失败的提示；确认框保持打开，由用户显式重试或取消
    mutation_error: RwSignal<Option<String>>,
}

impl<T: 'static, C: 'static> Clone for ListController<T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static, C: 'static> Copy for ListController<T, C> {}

impl<T, C> ListController<T, C>
where
    T: Clone + 'static,
    C: CollectionClient<T> + Clone + 'static,
{
    /// `id_key` 供删除请求取记录 id；`store` 决定搜索/日期字段
    pub fn new(client: C, store: ListStore<T>, id_key: fn(&T) -> &str) -> Self {
        Self {
            session: StoredValue::new_local(ListSession::new(client, store, id_key)),
            version: RwSignal::new(0),
            mutation_error: RwSignal::new(None),
        }
    }

    fn touch(&self) {
        self.version.update(|v| *v = v.wrapping_add(1));
    }

    /// 读取 store 的一个切面，并订阅后续变化
    pub fn read<R>(&self, f: impl FnOnce(&ListStore<T>) -> R) -> R {
        self.version.get();
        self.session.with_value(|s| s.with(f))
    }

    /// 当前页的可见切片（已过筛选 + 分页）
    pub fn visible(&self) -> PageView<T> {
        self.read(|s| s.visible())
    }

    pub fn is_loading(&self) -> bool {
        self.read(|s| s.is_loading())
    }

    pub fn fetch_error(&self) -> Option<String> {
        self.read(|s| s.error().map(str::to_string))
    }

    pub fn mutation_error(&self) -> ReadSignal<Option<String>> {
        self.mutation_error.read_only()
    }

    pub fn pending_delete(&self) -> Option<T> {
        self.read(|s| s.pending_delete().cloned())
    }

    // --- 拉取 ---

    /// 拉取集合。在途时静默跳过（同屏至多一个在途拉取）。
    /// 失败保留上一次成功的数据，错误另行展示。
    pub fn reload(&self) {
        let this = *self;
        let session = self.session.get_value();
        if !session.begin_load() {
            return;
        }
        this.touch();
        spawn_local(async move {
            session.finish_load().await;
            this.touch();
        });
    }

    /// 变更（创建/更新）成功后的统一善后：整体重拉，不做局部拼接
    pub fn after_mutation(&self) {
        self.reload();
    }

    // --- 查询 ---

    pub fn set_search(&self, search: String) {
        self.session.with_value(|s| s.update(|st| st.set_search(search)));
        self.touch();
    }

    pub fn set_page(&self, page: usize) {
        self.session.with_value(|s| s.update(|st| st.set_page(page)));
        self.touch();
    }

    pub fn set_date_range(&self, range: Option<DateRange>) {
        self.session
            .with_value(|s| s.update(|st| st.set_date_range(range)));
        self.touch();
    }

    // --- 删除确认 ---

    pub fn request_delete(&self, record: T) {
        self.mutation_error.set(None);
        self.session
            .with_value(|s| s.update(|st| st.request_delete(record)));
        self.touch();
    }

    pub fn cancel_delete(&self) {
        self.mutation_error.set(None);
        self.session.with_value(|s| s.update(|st| st.cancel_delete()));
        self.touch();
    }

    /// 确认删除：一次删除请求，成功后恰好一次重拉。
    /// 失败时目标留在待确认位，错误写入 `mutation_error`。
    pub fn confirm_delete(&self) {
        let this = *self;
        let session = self.session.get_value();
        spawn_local(async move {
            match session.delete_confirmed().await {
                DeleteOutcome::Failed(e) => this.mutation_error.set(Some(e.to_string())),
                DeleteOutcome::Deleted | DeleteOutcome::NothingPending => {
                    this.mutation_error.set(None)
                }
            }
            this.touch();
        });
    }
}
