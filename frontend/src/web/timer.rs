//! 定时器封装模块
//!
//! 封装 `setInterval`。`Interval` 是个值：它活着计时器就在跑，
//! drop 即清除。测验倒计时的三个退出路径（手动提交、到时自动
//! 提交、离开页面）都归结为"让这个值消亡"，不存在漏清的定时器。

use wasm_bindgen::prelude::*;

/// 周期性定时器
///
/// 当 `Interval` 被 drop 时，自动清除定时器。
pub struct Interval {
    handle: i32,
    #[allow(dead_code)]
    closure: Closure<dyn Fn()>,
}

impl Interval {
    /// 创建新的周期性定时器
    ///
    /// # 参数
    /// - `millis`: 间隔时间（毫秒）
    /// - `callback`: 每次间隔触发的回调函数
    ///
    /// # Panics
    /// 如果无法获取 window 对象或设置定时器失败
    pub fn new<F>(millis: u32, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        let closure = Closure::new(callback);
        let window = web_sys::window().expect("window object unavailable");

        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis as i32,
            )
            .expect("setInterval failed");

        Self { handle, closure }
    }

    /// 每秒一跳的倒计时定时器
    pub fn every_second<F>(callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self::new(1000, callback)
    }

    /// 取消定时器
    ///
    /// 通常不需要手动调用，因为 drop 时会自动清除。
    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}
