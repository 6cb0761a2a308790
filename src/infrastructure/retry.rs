//! 重试与退避 - 基础设施层
//!
//! 退避过程用一个小状态机表示：`Attempting → (BackingOff → Attempting)* → Succeeded | Exhausted`。
//! 尝试次数上限和退避倍数可以单独配置和测试。

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// 重试策略
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 最大尝试次数
    pub max_attempts: u32,
    /// 第一次退避的等待时间
    pub initial_delay: Duration,
    /// 每次退避后的等待时间倍数
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1500),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }
}

/// 单次尝试的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome<T> {
    /// 成功拿到结果
    Success(T),
    /// 被限流（HTTP 429），退避后重试
    RateLimited,
    /// 网络层失败，退避后重试；最后一次失败直接放弃
    NetworkError,
    /// 非瞬时错误，不重试
    Rejected,
}

impl<T> AttemptOutcome<T> {
    fn kind(&self) -> OutcomeKind {
        match self {
            AttemptOutcome::Success(_) => OutcomeKind::Success,
            AttemptOutcome::RateLimited => OutcomeKind::RateLimited,
            AttemptOutcome::NetworkError => OutcomeKind::NetworkError,
            AttemptOutcome::Rejected => OutcomeKind::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutcomeKind {
    Success,
    RateLimited,
    NetworkError,
    Rejected,
}

/// 重试状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    /// 正在进行第 `attempt` 次尝试（从 1 开始）
    Attempting { attempt: u32 },
    /// 第 `attempt` 次尝试失败，等待 `delay` 后再继续
    BackingOff { attempt: u32, delay: Duration },
    /// 放弃
    Exhausted,
    /// 成功
    Succeeded,
}

/// 退避状态机
#[derive(Debug, Clone)]
pub struct Backoff {
    policy: RetryPolicy,
    state: RetryState,
    next_delay: Duration,
}

impl Backoff {
    pub fn new(policy: RetryPolicy) -> Self {
        let next_delay = policy.initial_delay;
        Self {
            policy,
            state: RetryState::Attempting { attempt: 1 },
            next_delay,
        }
    }

    pub fn state(&self) -> RetryState {
        self.state
    }

    /// 记录当前尝试的结果并推进状态
    ///
    /// 限流在最后一次尝试时也会先退避再放弃；网络失败在最后一次尝试时直接放弃。
    pub fn record<T>(&mut self, outcome: &AttemptOutcome<T>) -> RetryState {
        let RetryState::Attempting { attempt } = self.state else {
            return self.state;
        };

        self.state = match outcome.kind() {
            OutcomeKind::Success => RetryState::Succeeded,
            OutcomeKind::Rejected => RetryState::Exhausted,
            OutcomeKind::RateLimited => self.back_off(attempt),
            OutcomeKind::NetworkError if attempt >= self.policy.max_attempts => {
                RetryState::Exhausted
            }
            OutcomeKind::NetworkError => self.back_off(attempt),
        };
        self.state
    }

    /// 退避等待结束后调用
    pub fn resume(&mut self) -> RetryState {
        if let RetryState::BackingOff { attempt, .. } = self.state {
            self.state = if attempt < self.policy.max_attempts {
                RetryState::Attempting {
                    attempt: attempt + 1,
                }
            } else {
                RetryState::Exhausted
            };
        }
        self.state
    }

    fn back_off(&mut self, attempt: u32) -> RetryState {
        let delay = self.next_delay;
        self.next_delay = delay * self.policy.multiplier;
        RetryState::BackingOff { attempt, delay }
    }
}

/// 按策略执行带退避的重试
///
/// `attempt_fn` 接收当前尝试序号（从 1 开始）。放弃时返回 `None`，不会返回错误。
pub async fn run_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut attempt_fn: F,
) -> Option<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = AttemptOutcome<T>>,
{
    let mut backoff = Backoff::new(policy.clone());

    loop {
        match backoff.state() {
            RetryState::Attempting { attempt } => {
                let outcome = attempt_fn(attempt).await;
                backoff.record(&outcome);
                if let AttemptOutcome::Success(value) = outcome {
                    return Some(value);
                }
            }
            RetryState::BackingOff { attempt, delay } => {
                warn!(
                    "{} 第 {}/{} 次尝试失败，等待 {:.1} 秒后重试...",
                    label,
                    attempt,
                    policy.max_attempts,
                    delay.as_secs_f64()
                );
                sleep(delay).await;
                backoff.resume();
            }
            RetryState::Exhausted => {
                debug!("{} 放弃重试", label);
                return None;
            }
            // 成功的结果在 Attempting 分支里已经返回
            RetryState::Succeeded => unreachable!("成功后不会再次进入重试循环"),
        }
    }
}
