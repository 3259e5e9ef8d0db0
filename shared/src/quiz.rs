//! 测验流程模块
//!
//! 唯一一个不止 CRUD 的屏幕：有倒计时和"只许提交一次"的约定，
//! 所以状态机单独建模。计时驱动由前端的 Interval 负责，这里只
//! 处理每一跳（tick）的纯状态转换，方便用模拟时钟测试。

use crate::date::Timestamp;
use crate::{QuizContent, QuizOutcome, SubmitQuizRequest};

/// 测验阶段：`NotStarted → InProgress → Submitted(Pass|Fail)`
///
/// `Submitting` 是提交请求在途时的过渡段；提交失败会退回
/// `InProgress` 供用户手动重试（无自动重试）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    InProgress,
    Submitting,
    Submitted(QuizOutcome),
}

/// 一次倒计时跳动的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// 不在计时（未开始、不限时、已到零或已提交）
    Inert,
    /// 计时中，携带剩余秒数
    Running(u32),
    /// 刚好走到零——调用方必须据此发起恰好一次自动提交
    Expired,
}

/// 单次答题会话
///
/// 重新作答需要重新拉取测验内容建一个新会话（回到 `NotStarted`），
/// 本会话一旦提交就终结。
#[derive(Debug, Clone)]
pub struct QuizSession {
    content: QuizContent,
    answers: Vec<Option<usize>>,
    remaining: Option<u32>,
    started_at: Option<Timestamp>,
    phase: QuizPhase,
}

impl QuizSession {
    pub fn new(content: QuizContent) -> Self {
        let answers = vec![None; content.questions.len()];
        let remaining = (content.duration > 0).then_some(content.duration);
        Self {
            content,
            answers,
            remaining,
            started_at: None,
            phase: QuizPhase::NotStarted,
        }
    }

    pub fn content(&self) -> &QuizContent {
        &self.content
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    pub fn started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// 开始作答：记录开始时间，限时测验同时起表。
    /// 只在 `NotStarted` 有效。
    pub fn start(&mut self, now: Timestamp) -> bool {
        if self.phase != QuizPhase::NotStarted {
            return false;
        }
        self.started_at = Some(now);
        self.phase = QuizPhase::InProgress;
        true
    }

    /// 选择答案；越界或不在作答中时忽略
    pub fn select(&mut self, question: usize, option: usize) -> bool {
        if self.phase != QuizPhase::InProgress {
            return false;
        }
        let Some(q) = self.content.questions.get(question) else {
            return false;
        };
        if option >= q.options.len() {
            return false;
        }
        self.answers[question] = Some(option);
        true
    }

    /// 倒计时走一秒
    ///
    /// 到零的那一跳返回 [`Tick::Expired`] 且只返回这一次；之后的
    /// 跳动一律 [`Tick::Inert`]，不会重复触发自动提交。
    pub fn tick(&mut self) -> Tick {
        if self.phase != QuizPhase::InProgress {
            return Tick::Inert;
        }
        let Some(remaining) = self.remaining else {
            return Tick::Inert;
        };
        if remaining == 0 {
            // 已到零但调用方还没提交：保持沉默，不再触发
            return Tick::Inert;
        }
        let next = remaining - 1;
        self.remaining = Some(next);
        if next == 0 { Tick::Expired } else { Tick::Running(next) }
    }

    /// 取提交载荷并进入在途态
    ///
    /// 幂等：只有 `InProgress` 才产出载荷；已提交（或在途）的会话
    /// 返回 None，再怎么叫也不会产生第二次提交。
    pub fn submit_payload(&mut self) -> Option<SubmitQuizRequest> {
        if self.phase != QuizPhase::InProgress {
            return None;
        }
        let started_at = self.started_at?;
        self.phase = QuizPhase::Submitting;
        Some(SubmitQuizRequest {
            id: self.content.id.clone(),
            answers: self.answers.clone(),
            started_at,
        })
    }

    /// 服务端判分返回后终结会话
    pub fn complete(&mut self, outcome: QuizOutcome) {
        if self.phase == QuizPhase::Submitting {
            self.phase = QuizPhase::Submitted(outcome);
        }
    }

    /// 提交请求失败：退回作答中，供用户显式重试
    pub fn fail_submission(&mut self) {
        if self.phase == QuizPhase::Submitting {
            self.phase = QuizPhase::InProgress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuizQuestion;

    fn quiz(duration: u32, questions: usize) -> QuizContent {
        QuizContent {
            id: "q-1".into(),
            course_name: "Rust Basics".into(),
            pass_percentage: 60,
            duration,
            questions: (0..questions)
                .map(|i| QuizQuestion {
                    id: None,
                    question: format!("Question {}", i + 1),
                    options: vec!["a".into(), "b".into(), "c".into()],
                })
                .collect(),
        }
    }

    fn now() -> Timestamp {
        Timestamp::new(1_700_000_000_000)
    }

    #[test]
    fn start_transitions_once() {
        let mut s = QuizSession::new(quiz(60, 2));
        assert_eq!(s.phase(), QuizPhase::NotStarted);
        assert!(s.start(now()));
        assert_eq!(s.phase(), QuizPhase::InProgress);
        assert!(!s.start(now()), "second start must be rejected");
    }

    #[test]
    fn select_requires_in_progress_and_bounds() {
        let mut s = QuizSession::new(quiz(0, 2));
        assert!(!s.select(0, 1), "cannot answer before start");
        s.start(now());
        assert!(s.select(0, 1));
        assert!(s.select(0, 2), "re-selecting overrides");
        assert_eq!(s.answers()[0], Some(2));
        assert!(!s.select(5, 0));
        assert!(!s.select(1, 9));
    }

    #[test]
    fn countdown_expires_exactly_once() {
        let mut s = QuizSession::new(quiz(60, 3));
        s.start(now());

        let mut expired = 0;
        for _ in 0..120 {
            if s.tick() == Tick::Expired {
                expired += 1;
            }
        }
        assert_eq!(expired, 1, "expiry must fire exactly once");
        assert_eq!(s.remaining(), Some(0));
        // 到期后（调用方尚未提交）会话仍在作答中，但计时保持沉默
        assert_eq!(s.phase(), QuizPhase::InProgress);
        assert_eq!(s.tick(), Tick::Inert);
    }

    #[test]
    fn untimed_quiz_never_ticks() {
        let mut s = QuizSession::new(quiz(0, 1));
        s.start(now());
        assert_eq!(s.remaining(), None);
        assert_eq!(s.tick(), Tick::Inert);
    }

    #[test]
    fn expiry_submit_carries_all_null_answers() {
        // 时长 60 秒、从不作答：60 跳后恰好一次提交，答案全空
        let mut s = QuizSession::new(quiz(60, 4));
        s.start(now());

        let mut payloads = Vec::new();
        for _ in 0..60 {
            if s.tick() == Tick::Expired {
                if let Some(p) = s.submit_payload() {
                    payloads.push(p);
                }
            }
        }
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].answers, vec![None, None, None, None]);
        assert_eq!(payloads[0].started_at, now());
        assert_eq!(s.phase(), QuizPhase::Submitting);

        s.complete(QuizOutcome::Fail);
        assert_eq!(s.phase(), QuizPhase::Submitted(QuizOutcome::Fail));
    }

    #[test]
    fn submit_is_idempotent() {
        let mut s = QuizSession::new(quiz(0, 2));
        s.start(now());
        s.select(0, 1);

        let first = s.submit_payload().expect("first submit");
        assert_eq!(first.answers, vec![Some(1), None]);
        assert!(s.submit_payload().is_none(), "no double submit");

        s.complete(QuizOutcome::Pass);
        assert!(s.submit_payload().is_none());
        assert_eq!(s.tick(), Tick::Inert, "no countdown after submission");
    }

    #[test]
    fn failed_submission_allows_manual_retry() {
        let mut s = QuizSession::new(quiz(0, 1));
        s.start(now());
        assert!(s.submit_payload().is_some());

        s.fail_submission();
        assert_eq!(s.phase(), QuizPhase::InProgress);
        assert!(s.submit_payload().is_some(), "explicit retry allowed");
    }

    #[test]
    fn submit_before_start_is_rejected() {
        let mut s = QuizSession::new(quiz(0, 1));
        assert!(s.submit_payload().is_none());
    }
}
