use crate::api::LmsApi;
use crate::auth::{self, use_session};
use crate::components::icons::GraduationCap;
use crate::config;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use classdesk_shared::{LoginRequest, RegisterRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session_ctx = use_session();
    let router = use_router();

    let (is_login, set_is_login) = signal(true);
    let (full_name, set_full_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (date_of_birth, set_date_of_birth) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (info_msg, set_info_msg) = signal(Option::<String>::None);

    // 登录/注册都不带令牌
    let api = StoredValue::new(LmsApi::new(config::api_base().to_string(), None));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        // 统一的客户端必填校验，空字段不打扰服务端
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }
        if !is_login.get() && full_name.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);
        set_info_msg.set(None);

        spawn_local(async move {
            if is_login.get_untracked() {
                let request = LoginRequest {
                    email: email.get_untracked(),
                    password: password.get_untracked(),
                };
                match api.get_value().send(&request).await {
                    Ok(response) => match auth::login(&session_ctx, &response.token) {
                        Ok(role) => router.navigate_route(AppRoute::home_for(role)),
                        Err(e) => set_error_msg.set(Some(e.to_string())),
                    },
                    Err(e) => set_error_msg.set(Some(e.to_string())),
                }
            } else {
                let request = RegisterRequest {
                    full_name: full_name.get_untracked(),
                    email: email.get_untracked(),
                    password: password.get_untracked(),
                    date_of_birth: date_of_birth.get_untracked(),
                };
                match api.get_value().send(&request).await {
                    Ok(_) => {
                        set_info_msg.set(Some("Signup successful! Please login.".to_string()));
                        set_is_login.set(true);
                    }
                    Err(e) => set_error_msg.set(Some(e.to_string())),
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <GraduationCap attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"ClassDesk"</h1>
                        <p class="text-base-content/70">
                            {move || if is_login.get() {
                                "Sign in to continue learning"
                            } else {
                                "Create your learner account"
                            }}
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <Show when=move || info_msg.get().is_some()>
                            <div role="alert" class="alert alert-success text-sm py-2">
                                <span>{move || info_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <Show when=move || !is_login.get()>
                            <div class="form-control">
                                <label class="label" for="full_name">
                                    <span class="label-text">"Full name"</span>
                                </label>
                                <input
                                    id="full_name"
                                    type="text"
                                    placeholder="Ada Lovelace"
                                    on:input=move |ev| set_full_name.set(event_target_value(&ev))
                                    prop:value=full_name
                                    class="input input-bordered"
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="date_of_birth">
                                    <span class="label-text">"Date of birth"</span>
                                </label>
                                <input
                                    id="date_of_birth"
                                    type="date"
                                    on:input=move |ev| set_date_of_birth.set(event_target_value(&ev))
                                    prop:value=date_of_birth
                                    class="input input-bordered"
                                />
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Please wait..." }.into_any()
                                } else if is_login.get() {
                                    "Login".into_any()
                                } else {
                                    "Sign Up".into_any()
                                }}
                            </button>
                        </div>

                        <div class="text-center mt-2">
                            <a
                                class="link link-hover text-sm"
                                on:click=move |_| {
                                    set_error_msg.set(None);
                                    set_info_msg.set(None);
                                    set_is_login.update(|v| *v = !*v);
                                }
                            >
                                {move || if is_login.get() {
                                    "No account yet? Sign up"
                                } else {
                                    "Already registered? Login"
                                }}
                            </a>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
