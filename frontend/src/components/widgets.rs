//! 通用界面小件
//!
//! 列表屏幕共用的搜索框、分页条、通知条与删除确认框。

use crate::components::icons::Search;
use leptos::prelude::*;

#[component]
pub fn SearchBox(
    /// 当前搜索词
    value: Signal<String>,
    /// 每次按键都触发（本地筛选，不重新拉取）
    #[prop(into)] on_input: Callback<String>,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <label class="input input-bordered input-sm flex items-center gap-2 w-64">
            <Search attr:class="h-4 w-4 opacity-50" />
            <input
                type="text"
                class="grow"
                placeholder=placeholder
                prop:value=value
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn PaginationBar(
    page: Signal<usize>,
    total_pages: Signal<usize>,
    #[prop(into)] on_page: Callback<usize>,
) -> impl IntoView {
    view! {
        <Show when=move || total_pages.get() > 1>
            <div class="join justify-center w-full py-2">
                <button
                    class="join-item btn btn-sm"
                    disabled=move || page.get() <= 1
                    on:click=move |_| on_page.run(page.get() - 1)
                >
                    "«"
                </button>
                <button class="join-item btn btn-sm btn-ghost no-animation">
                    {move || format!("Page {} / {}", page.get(), total_pages.get())}
                </button>
                <button
                    class="join-item btn btn-sm"
                    disabled=move || page.get() >= total_pages.get()
                    on:click=move |_| on_page.run(page.get() + 1)
                >
                    "»"
                </button>
            </div>
        </Show>
    }
}

/// 右上角通知条；`(消息内容, 是否出错)`
#[component]
pub fn Toast(notification: Signal<Option<(String, bool)>>) -> impl IntoView {
    view! {
        <Show when=move || notification.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    let (_, is_err) = notification.get().unwrap();
                    if is_err {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || notification.get().unwrap().0}</span>
                </div>
            </div>
        </Show>
    }
}

/// 删除确认框
///
/// 点名要删的那条记录；取消不碰集合，确认才发请求。
/// 请求失败时 `error` 非空，弹窗保持打开供用户重试或取消。
#[component]
pub fn ConfirmDeleteDialog(
    /// 待删除记录的展示名；None 时弹窗关闭
    target: Signal<Option<String>>,
    /// 变更失败的提示
    error: Signal<Option<String>>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if target.get().is_some() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| on_cancel.run(())>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Are you sure you want to delete this?"</h3>
                <p class="py-4 font-bold">
                    {move || target.get().unwrap_or_default()}
                </p>
                <Show when=move || error.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error.get().unwrap_or_default()}</span>
                    </div>
                </Show>
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class="btn btn-error"
                        on:click=move |_| on_confirm.run(())
                    >
                        "OK"
                    </button>
                </div>
            </div>
        </dialog>
    }
}
