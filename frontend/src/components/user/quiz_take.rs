use crate::auth::{self, use_api};
use crate::components::icons::Clock;
use crate::web::Interval;
use crate::web::router::use_router;
use classdesk_shared::protocol::TakeQuizRequest;
use classdesk_shared::quiz::{QuizPhase, QuizSession, Tick};
use classdesk_shared::{QuizOutcome, QuizQuestion};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 秒数格式化为 `mm:ss`
fn format_time(sec: u32) -> String {
    format!("{:02}:{:02}", sec / 60, sec % 60)
}

/// 答题页面
///
/// 状态机在 `classdesk_shared::quiz` 里；这个组件只负责：
/// 拉取内容、驱动每秒一跳的 Interval、把到期/点击翻译成提交。
/// 倒计时的三个退出路径（手动提交、到期自动提交、离开页面）都
/// 通过丢弃 `Interval` 值完成清理，不存在残留的定时器。
#[component]
pub fn QuizTakePage(quiz_id: String) -> impl IntoView {
    let router = use_router();

    let quiz = RwSignal::new(Option::<QuizSession>::None);
    let (load_error, set_load_error) = signal(Option::<String>::None);
    let (submit_error, set_submit_error) = signal(Option::<String>::None);
    let (score, set_score) = signal(Option::<f64>::None);

    let api = StoredValue::new(use_api());
    // Interval 不是 Send 的，线程本地存放；置 None 即取消
    let timer: StoredValue<Option<Interval>, LocalStorage> = StoredValue::new_local(None);

    // 拉取测验内容；重新进入页面就是一次全新的会话（NotStarted）
    {
        let quiz_id = quiz_id.clone();
        spawn_local(async move {
            match api.get_value().send(&TakeQuizRequest { id: quiz_id }).await {
                Ok(content) => quiz.set(Some(QuizSession::new(content))),
                Err(e) => set_load_error.set(Some(e.to_string())),
            }
        });
    }

    // 提交（手动与到期共用）。状态机保证幂等：拿不到载荷就什么都不做。
    let do_submit = move || {
        let Some(payload) = quiz
            .try_update(|q| q.as_mut().and_then(|s| s.submit_payload()))
            .flatten()
        else {
            return;
        };
        set_submit_error.set(None);
        spawn_local(async move {
            // 在定时器回调栈之外清掉倒计时
            timer.set_value(None);
            match api.get_value().send(&payload).await {
                Ok(result) => {
                    set_score.set(Some(result.score));
                    quiz.update(|q| {
                        if let Some(s) = q.as_mut() {
                            s.complete(result.status);
                        }
                    });
                }
                Err(e) => {
                    // 提交失败退回作答中，由用户显式重试；无自动重试
                    set_submit_error.set(Some(e.to_string()));
                    quiz.update(|q| {
                        if let Some(s) = q.as_mut() {
                            s.fail_submission();
                        }
                    });
                }
            }
        });
    };

    let on_start = move |_| {
        let started = quiz
            .try_update(|q| q.as_mut().map(|s| s.start(auth::now())))
            .flatten()
            .unwrap_or(false);
        if !started {
            return;
        }
        let timed =
            quiz.with_untracked(|q| q.as_ref().is_some_and(|s| s.remaining().is_some()));
        if timed {
            timer.set_value(Some(Interval::every_second(move || {
                let ticked = quiz
                    .try_update(|q| q.as_mut().map(|s| s.tick()))
                    .flatten();
                if ticked == Some(Tick::Expired) {
                    // 到期恰好触发一次自动提交，答案保持当下所选
                    do_submit();
                }
            })));
        }
    };

    // 离开页面：倒计时一并消亡，不会对已卸载的界面发起提交
    on_cleanup(move || timer.set_value(None));

    let phase = Signal::derive(move || quiz.get().map(|s| s.phase()));
    let in_progress = move || phase.get() == Some(QuizPhase::InProgress);
    let submitting = move || phase.get() == Some(QuizPhase::Submitting);
    let remaining = Signal::derive(move || quiz.get().and_then(|s| s.remaining()));

    let questions = move || {
        quiz.get()
            .map(|s| {
                s.content()
                    .questions
                    .clone()
                    .into_iter()
                    .enumerate()
                    .collect::<Vec<(usize, QuizQuestion)>>()
            })
            .unwrap_or_default()
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-3xl mx-auto space-y-4">
                <Show when=move || load_error.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || load_error.get().unwrap_or_default()}</span>
                        <button class="btn btn-sm" on:click=move |_| router.navigate("/user/dashboard")>
                            "Back"
                        </button>
                    </div>
                </Show>

                <Show when=move || quiz.get().is_none() && load_error.get().is_none()>
                    <div class="flex justify-center py-16">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                </Show>

                <Show when=move || quiz.get().is_some()>
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <div class="flex items-center justify-between flex-wrap gap-2">
                                <div>
                                    <h2 class="card-title">
                                        {move || quiz.get().map(|s| s.content().course_name.clone()).unwrap_or_default()}
                                    </h2>
                                    <p class="text-sm text-base-content/70">
                                        {move || quiz.get().map(|s| format!("Pass percentage: {}%", s.content().pass_percentage)).unwrap_or_default()}
                                    </p>
                                </div>
                                <Show when=move || remaining.get().is_some()>
                                    <div class="flex items-center gap-2 font-mono text-xl">
                                        <Clock attr:class="h-5 w-5" />
                                        {move || match remaining.get() {
                                            Some(r) => format_time(r),
                                            None => String::new(),
                                        }}
                                    </div>
                                </Show>
                            </div>

                            <Show when=move || phase.get() == Some(QuizPhase::NotStarted)>
                                <div class="py-4">
                                    <p class="mb-4 text-base-content/70">
                                        {move || {
                                            let duration = quiz.get().map(|s| s.content().duration).unwrap_or(0);
                                            if duration > 0 {
                                                format!("Time limit: {} minutes. The quiz submits automatically when the timer runs out.", duration / 60)
                                            } else {
                                                "No time limit for this quiz.".to_string()
                                            }
                                        }}
                                    </p>
                                    <button class="btn btn-primary" on:click=on_start>
                                        "Start Quiz"
                                    </button>
                                </div>
                            </Show>

                            <Show when=move || submit_error.get().is_some()>
                                <div role="alert" class="alert alert-error text-sm py-2">
                                    <span>{move || submit_error.get().unwrap_or_default()}</span>
                                </div>
                            </Show>

                            <Show when=move || matches!(phase.get(), Some(QuizPhase::Submitted(_)))>
                                <div class=move || {
                                    if phase.get() == Some(QuizPhase::Submitted(QuizOutcome::Pass)) {
                                        "alert alert-success"
                                    } else {
                                        "alert alert-error"
                                    }
                                }>
                                    <span class="font-bold">
                                        {move || match phase.get() {
                                            Some(QuizPhase::Submitted(QuizOutcome::Pass)) => "Result: PASS",
                                            Some(QuizPhase::Submitted(QuizOutcome::Fail)) => "Result: FAIL",
                                            _ => "",
                                        }}
                                    </span>
                                    <span>
                                        {move || score.get().map(|s| format!("Score: {:.0}", s)).unwrap_or_default()}
                                    </span>
                                    <button class="btn btn-sm" on:click=move |_| router.navigate("/user/dashboard")>
                                        "Back to dashboard"
                                    </button>
                                </div>
                            </Show>

                            <Show when=move || in_progress() || submitting()>
                                <form on:submit=move |ev: leptos::web_sys::SubmitEvent| {
                                    ev.prevent_default();
                                    do_submit();
                                }>
                                    <div class="space-y-4">
                                        <For
                                            each=questions
                                            key=|(i, _)| *i
                                            children=move |(qi, question)| {
                                                view! {
                                                    <div class="border border-base-300 rounded-lg p-4">
                                                        <p class="font-medium mb-2">
                                                            {format!("{}. {}", qi + 1, question.question.clone())}
                                                        </p>
                                                        <div class="space-y-1">
                                                            {question
                                                                .options
                                                                .iter()
                                                                .enumerate()
                                                                .map(|(oi, option)| {
                                                                    let option = option.clone();
                                                                    view! {
                                                                        <label class="flex items-center gap-2 cursor-pointer">
                                                                            <input
                                                                                type="radio"
                                                                                class="radio radio-sm radio-primary"
                                                                                name=format!("question-{}", qi)
                                                                                prop:checked=move || {
                                                                                    quiz.get()
                                                                                        .and_then(|s| s.answers().get(qi).copied().flatten())
                                                                                        == Some(oi)
                                                                                }
                                                                                on:change=move |_| {
                                                                                    quiz.update(|q| {
                                                                                        if let Some(s) = q.as_mut() {
                                                                                            s.select(qi, oi);
                                                                                        }
                                                                                    });
                                                                                }
                                                                            />
                                                                            <span>{option}</span>
                                                                        </label>
                                                                    }
                                                                })
                                                                .collect_view()}
                                                        </div>
                                                    </div>
                                                }
                                            }
                                        />
                                    </div>

                                    <div class="mt-6 flex items-center gap-3">
                                        <button
                                            type="submit"
                                            class="btn btn-primary"
                                            disabled=move || submitting()
                                        >
                                            {move || if submitting() {
                                                view! { <span class="loading loading-spinner"></span> "Submitting..." }.into_any()
                                            } else {
                                                "Submit".into_any()
                                            }}
                                        </button>
                                        <span class="text-sm text-base-content/60">
                                            {move || {
                                                let (answered, total) = quiz.get()
                                                    .map(|s| (s.answered_count(), s.content().questions.len()))
                                                    .unwrap_or((0, 0));
                                                format!("{} of {} answered", answered, total)
                                            }}
                                        </span>
                                    </div>
                                </form>
                            </Show>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
