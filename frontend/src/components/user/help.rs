use crate::auth::use_api;
use crate::components::icons::{BookOpen, HelpCircle};
use crate::config;
use classdesk_shared::protocol::{ListFaqsRequest, ListManualsRequest};
use classdesk_shared::{FaqEntry, ManualEntry};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 帮助页：FAQ + 手册下载
///
/// 两个集合各自独立拉取，谁先回来谁先渲染，互不等待
/// （各占一块展示区域，不需要全局顺序）。
#[component]
pub fn HelpPage() -> impl IntoView {
    let api = use_api();

    let (faqs, set_faqs) = signal(Vec::<FaqEntry>::new());
    let (manuals, set_manuals) = signal(Vec::<ManualEntry>::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            match api.send(&ListFaqsRequest).await {
                Ok(env) => set_faqs.set(env.into_items()),
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
        });
    }
    spawn_local(async move {
        match api.send(&ListManualsRequest).await {
            Ok(env) => set_manuals.set(env.into_items()),
            Err(e) => set_error_msg.set(Some(e.to_string())),
        }
    });

    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title gap-2">
                        <HelpCircle attr:class="h-5 w-5" /> "Frequently asked questions"
                    </h3>

                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-warning text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <Show when=move || faqs.get().is_empty()>
                        <p class="text-base-content/50 text-sm">"No FAQs published."</p>
                    </Show>

                    <For
                        each=move || faqs.get()
                        key=|f| f.id.clone()
                        children=move |faq| {
                            view! {
                                <div class="collapse collapse-arrow bg-base-200">
                                    <input type="checkbox" />
                                    <div class="collapse-title font-medium">
                                        {faq.question.clone()}
                                    </div>
                                    <div class="collapse-content text-sm">
                                        <p>{faq.answer.clone()}</p>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title gap-2">
                        <BookOpen attr:class="h-5 w-5" /> "User manuals"
                    </h3>

                    <Show when=move || manuals.get().is_empty()>
                        <p class="text-base-content/50 text-sm">"No manuals uploaded."</p>
                    </Show>

                    <ul class="space-y-2">
                        <For
                            each=move || manuals.get()
                            key=|m| m.id.clone()
                            children=move |manual| {
                                // 上传文件走配置的静态资源源站
                                let href = config::uploads_url(&manual.file_url);
                                view! {
                                    <li>
                                        <a
                                            class="link link-primary"
                                            href=href
                                            target="_blank"
                                            rel="noopener"
                                        >
                                            {manual.title.clone()}
                                        </a>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </div>
            </div>
        </div>
    }
}
