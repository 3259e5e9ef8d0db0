use super::*;
use crate::error::ApiError;
use std::collections::HashSet;

// =========================================================
// Fixtures
// =========================================================

#[derive(Debug, Clone, PartialEq)]
struct Record {
    id: String,
    name: String,
    at: Option<Timestamp>,
}

fn record(n: usize, name: &str) -> Record {
    Record {
        id: format!("r-{}", n),
        name: name.to_string(),
        at: Some(Timestamp::new(n as i64 * 1000)),
    }
}

fn records(n: usize) -> Vec<Record> {
    (1..=n).map(|i| record(i, &format!("record {}", i))).collect()
}

fn store() -> ListStore<Record> {
    ListStore::new(|r: &Record| r.name.as_str())
}

fn loaded(n: usize) -> ListStore<Record> {
    let mut s = store();
    assert!(s.begin_load());
    s.apply_fetch_ok(records(n));
    s
}

// =========================================================
// Filter + pagination
// =========================================================

#[test]
fn pages_partition_the_filtered_set() {
    let mut s = loaded(25);

    // 25 条、每页 10：第 1 页 1-10，共 3 页
    let p1 = s.visible();
    assert_eq!(p1.total_pages, 3);
    assert_eq!(p1.filtered_total, 25);
    assert_eq!(p1.items.len(), 10);
    assert_eq!(p1.items[0].id, "r-1");
    assert_eq!(p1.items[9].id, "r-10");

    // 各页拼起来恰好覆盖全集，无重复无遗漏，末页可以短
    let mut seen = HashSet::new();
    let mut count = 0;
    for page in 1..=p1.total_pages {
        s.set_page(page);
        let view = s.visible();
        for item in &view.items {
            assert!(seen.insert(item.id.clone()), "duplicated across pages");
            count += 1;
        }
    }
    assert_eq!(count, 25);
    s.set_page(3);
    assert_eq!(s.visible().items.len(), 5);
}

#[test]
fn search_is_case_insensitive_substring() {
    let mut s = store();
    assert!(s.begin_load());
    s.apply_fetch_ok(vec![
        record(1, "Rust Basics"),
        record(2, "Advanced Rust"),
        record(3, "SQL Fundamentals"),
    ]);

    s.set_search("rust".into());
    let names: Vec<_> = s.visible().items.iter().map(|r| r.name.clone()).collect();
    assert_eq!(names, vec!["Rust Basics", "Advanced Rust"]);
}

#[test]
fn filtering_is_idempotent() {
    let mut s = loaded(25);
    s.set_search("record 1".into());
    let first = s.visible();
    s.set_search("record 1".into());
    let second = s.visible();
    assert_eq!(first, second);
}

#[test]
fn narrowing_search_collapses_pages() {
    let mut s = loaded(25);
    s.set_page(3);

    // 搜索命中 3 条：缩成 1 页，且恰好是那 3 条
    s.set_search("record 2".into());
    let view = s.visible();
    let hits: Vec<_> = view.items.iter().map(|r| r.id.clone()).collect();
    // "record 2" 匹配 record 2, 20..25 共 7 条——换个更窄的词
    assert_eq!(view.page, 1, "out-of-range page falls back to 1");
    assert_eq!(hits.len(), 7);

    s.set_search("record 24".into());
    let view = s.visible();
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.filtered_total, 1);
    assert_eq!(view.items[0].id, "r-24");
}

#[test]
fn three_hits_collapse_to_a_single_exact_page() {
    let mut s = store();
    assert!(s.begin_load());
    let mut rows = records(22);
    rows.push(record(23, "Intro to Rust"));
    rows.push(record(24, "Rust in Practice"));
    rows.push(record(25, "Embedded Rust"));
    s.apply_fetch_ok(rows);
    s.set_page(3);

    s.set_search("rust".into());
    let view = s.visible();
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.page, 1);
    let names: Vec<_> = view.items.iter().map(|r| r.name.clone()).collect();
    assert_eq!(
        names,
        vec!["Intro to Rust", "Rust in Practice", "Embedded Rust"]
    );
}

#[test]
fn page_stays_put_when_still_in_range() {
    let mut s = loaded(25);
    s.set_page(2);
    // 新筛选结果仍有 2 页以上时，页码不动
    s.set_search("record".into());
    assert_eq!(s.visible().page, 2);
}

#[test]
fn page_clamping() {
    let mut s = loaded(25);
    s.set_page(99);
    assert_eq!(s.visible().page, 3);
    s.set_page(0);
    assert_eq!(s.visible().page, 1);

    let empty = loaded(0);
    assert_eq!(empty.visible().total_pages, 1);
    assert_eq!(empty.visible().page, 1);
}

#[test]
fn date_range_filters_records() {
    let mut s = ListStore::new(|r: &Record| r.name.as_str()).with_date_key(|r| r.at);
    assert!(s.begin_load());
    s.apply_fetch_ok(records(10));

    s.set_date_range(Some(DateRange::new(
        Some(Timestamp::new(3000)),
        Some(Timestamp::new(5000)),
    )));
    let ids: Vec<_> = s.visible().items.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec!["r-3", "r-4", "r-5"]);

    // 完全开放的窗口等价于没有筛选
    s.set_date_range(Some(DateRange::default()));
    assert_eq!(s.visible().filtered_total, 10);
}

// =========================================================
// Fetch lifecycle
// =========================================================

#[test]
fn single_load_in_flight() {
    let mut s = store();
    assert!(s.begin_load());
    assert!(!s.begin_load(), "second load while in flight must be refused");
    s.apply_fetch_ok(records(1));
    assert!(s.begin_load());
}

#[test]
fn fetch_error_keeps_last_good_data() {
    let mut s = loaded(5);
    assert!(s.begin_load());
    s.apply_fetch_err("boom".into());

    assert_eq!(s.items().len(), 5, "previous collection must stay visible");
    assert_eq!(s.error(), Some("boom"));
    assert!(!s.is_loading());

    // 下一次成功拉取清掉错误
    assert!(s.begin_load());
    s.apply_fetch_ok(records(2));
    assert!(s.error().is_none());
}

#[test]
fn refetch_clamps_page_after_shrink() {
    let mut s = loaded(25);
    s.set_page(3);
    assert!(s.begin_load());
    s.apply_fetch_ok(records(4));
    assert_eq!(s.visible().page, 1);
}

// =========================================================
// Pending delete
// =========================================================

#[test]
fn at_most_one_pending_delete() {
    let mut s = loaded(3);
    s.request_delete(record(1, "record 1"));
    s.request_delete(record(2, "record 2"));
    assert_eq!(s.pending_delete().unwrap().id, "r-2");

    s.cancel_delete();
    assert!(s.pending_delete().is_none());
    assert!(s.take_confirmed().is_none());
    assert_eq!(s.items().len(), 3, "cancel leaves the collection unchanged");
}

// =========================================================
// Session flow (mock client, op-log ordering)
// =========================================================

struct FlowContext {
    log: RefCell<Vec<String>>,
    rows: RefCell<Vec<Record>>,
    fail_delete: RefCell<Option<ApiError>>,
    fail_fetch: RefCell<bool>,
}

impl FlowContext {
    fn new(rows: Vec<Record>) -> Rc<Self> {
        Rc::new(Self {
            log: RefCell::new(Vec::new()),
            rows: RefCell::new(rows),
            fail_delete: RefCell::new(None),
            fail_fetch: RefCell::new(false),
        })
    }

    fn log_of(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

#[derive(Clone)]
struct MockClient {
    ctx: Rc<FlowContext>,
}

#[async_trait(?Send)]
impl CollectionClient<Record> for MockClient {
    async fn fetch(&self, _query: &ListQuery) -> ApiResult<Vec<Record>> {
        self.ctx.log.borrow_mut().push("fetch".into());
        if *self.ctx.fail_fetch.borrow() {
            return Err(ApiError::Network("offline".into()));
        }
        Ok(self.ctx.rows.borrow().clone())
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.ctx.log.borrow_mut().push(format!("delete:{}", id));
        if let Some(e) = self.ctx.fail_delete.borrow().clone() {
            return Err(e);
        }
        self.ctx.rows.borrow_mut().retain(|r| r.id != id);
        Ok(())
    }
}

fn session(ctx: &Rc<FlowContext>) -> ListSession<Record, MockClient> {
    ListSession::new(
        MockClient { ctx: Rc::clone(ctx) },
        ListStore::new(|r: &Record| r.name.as_str()),
        |r: &Record| r.id.as_str(),
    )
}

#[tokio::test]
async fn confirmed_delete_issues_one_delete_then_one_refetch() {
    let ctx = FlowContext::new(records(3));
    let sess = session(&ctx);
    sess.load().await;
    ctx.log.borrow_mut().clear();

    let target = record(2, "record 2");
    sess.update(|s| s.request_delete(target));
    assert_eq!(sess.delete_confirmed().await, DeleteOutcome::Deleted);

    assert_eq!(ctx.log_of(), vec!["delete:r-2", "fetch"]);
    let remaining: Vec<_> = sess.with(|s| {
        s.visible().items.iter().map(|r| r.id.clone()).collect()
    });
    assert_eq!(remaining, vec!["r-1", "r-3"], "deleted record must be gone");
    assert!(sess.with(|s| s.pending_delete().is_none()));
}

#[tokio::test]
async fn delete_without_confirmation_does_nothing() {
    let ctx = FlowContext::new(records(3));
    let sess = session(&ctx);
    sess.load().await;
    ctx.log.borrow_mut().clear();

    sess.update(|s| s.request_delete(record(2, "record 2")));
    sess.update(|s| s.cancel_delete());
    assert_eq!(sess.delete_confirmed().await, DeleteOutcome::NothingPending);

    assert!(ctx.log_of().is_empty(), "cancel must not touch the backend");
    assert_eq!(sess.with(|s| s.items().len()), 3);
}

#[tokio::test]
async fn failed_delete_keeps_dialog_open_and_collection_intact() {
    let ctx = FlowContext::new(records(3));
    let sess = session(&ctx);
    sess.load().await;
    ctx.log.borrow_mut().clear();
    *ctx.fail_delete.borrow_mut() = Some(ApiError::server(500, "nope"));

    sess.update(|s| s.request_delete(record(2, "record 2")));
    let outcome = sess.delete_confirmed().await;
    assert_eq!(outcome, DeleteOutcome::Failed(ApiError::server(500, "nope")));

    // 目标还在待确认位（弹窗保持打开），集合没动，也没有重拉
    assert_eq!(sess.with(|s| s.pending_delete().unwrap().id.clone()), "r-2");
    assert_eq!(sess.with(|s| s.items().len()), 3);
    assert_eq!(ctx.log_of(), vec!["delete:r-2"]);
}

#[tokio::test]
async fn expired_token_surfaces_as_unauthorized() {
    let ctx = FlowContext::new(records(1));
    let sess = session(&ctx);
    sess.load().await;
    *ctx.fail_delete.borrow_mut() = Some(ApiError::Unauthorized);

    sess.update(|s| s.request_delete(record(1, "record 1")));
    let outcome = sess.delete_confirmed().await;
    assert_eq!(outcome, DeleteOutcome::Failed(ApiError::Unauthorized));
}

#[tokio::test]
async fn failed_refetch_keeps_last_good_snapshot() {
    let ctx = FlowContext::new(records(5));
    let sess = session(&ctx);
    sess.load().await;

    *ctx.fail_fetch.borrow_mut() = true;
    sess.load().await;

    assert_eq!(sess.with(|s| s.items().len()), 5);
    assert!(sess.with(|s| s.error().is_some()));
}
