//! Moving-average crossover signal evaluation.
//!
//! Looks at the last index of the fast/slow series and its immediate
//! predecessor. A fresh crossover takes priority over continuation; when the
//! current pair is undefined or equal the result is `Hold`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => write!(f, "buy"),
            Action::Sell => write!(f, "sell"),
            Action::Hold => write!(f, "hold"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    BullishCrossover,
    BearishCrossover,
    BullishContinuation,
    BearishContinuation,
    NoSignal,
}

impl SignalKind {
    pub fn action(self) -> Action {
        match self {
            SignalKind::BullishCrossover | SignalKind::BullishContinuation => Action::Buy,
            SignalKind::BearishCrossover | SignalKind::BearishContinuation => Action::Sell,
            SignalKind::NoSignal => Action::Hold,
        }
    }

    pub fn is_crossover(self) -> bool {
        matches!(
            self,
            SignalKind::BullishCrossover | SignalKind::BearishCrossover
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub action: Action,
    pub kind: SignalKind,
    pub reason: String,
}

/// Fast/slow pair at one index; `None` when either side is still warming up.
fn pair_at(fast: &[Option<f64>], slow: &[Option<f64>], index: usize) -> Option<(f64, f64)> {
    match (fast.get(index).copied().flatten(), slow.get(index).copied().flatten()) {
        (Some(f), Some(s)) => Some((f, s)),
        _ => None,
    }
}

pub fn classify(fast: &[Option<f64>], slow: &[Option<f64>]) -> SignalKind {
    let len = fast.len().min(slow.len());
    if len == 0 {
        return SignalKind::NoSignal;
    }

    let last = len - 1;
    let current = pair_at(fast, slow, last);
    let previous = last.checked_sub(1).and_then(|i| pair_at(fast, slow, i));

    let Some((cur_fast, cur_slow)) = current else {
        return SignalKind::NoSignal;
    };

    if let Some((prev_fast, prev_slow)) = previous {
        if prev_fast <= prev_slow && cur_fast > cur_slow {
            return SignalKind::BullishCrossover;
        }
        if prev_fast >= prev_slow && cur_fast < cur_slow {
            return SignalKind::BearishCrossover;
        }
    }

    if cur_fast > cur_slow {
        SignalKind::BullishContinuation
    } else if cur_fast < cur_slow {
        SignalKind::BearishContinuation
    } else {
        SignalKind::NoSignal
    }
}

/// Classify the latest fast/slow relationship and explain it.
///
/// `closes` supplies the latest close for the rationale; it does not affect
/// the decision.
pub fn evaluate_signal(fast: &[Option<f64>], slow: &[Option<f64>], closes: &[f64]) -> Signal {
    let kind = classify(fast, slow);
    let last = fast.len().min(slow.len()).checked_sub(1);
    let current = last.and_then(|i| pair_at(fast, slow, i));
    let close = closes.last().copied();

    let reason = describe(kind, current, close);
    Signal {
        action: kind.action(),
        kind,
        reason,
    }
}

fn describe(kind: SignalKind, current: Option<(f64, f64)>, close: Option<f64>) -> String {
    let levels = match current {
        Some((f, s)) => format!("fast {:.4} vs slow {:.4}", f, s),
        None => "moving averages not yet defined".to_string(),
    };
    let at_close = close
        .map(|c| format!(" at close {:.4}", c))
        .unwrap_or_default();

    match kind {
        SignalKind::BullishCrossover => format!(
            "Bullish crossover detected: fast MA crossed above slow MA ({levels}){at_close}"
        ),
        SignalKind::BearishCrossover => format!(
            "Bearish crossover detected: fast MA crossed below slow MA ({levels}){at_close}"
        ),
        SignalKind::BullishContinuation => format!(
            "Trend continuation: fast MA remains above slow MA, no fresh crossover ({levels}){at_close}"
        ),
        SignalKind::BearishContinuation => format!(
            "Trend continuation: fast MA remains below slow MA, no fresh crossover ({levels}){at_close}"
        ),
        SignalKind::NoSignal => format!("No actionable signal ({levels}){at_close}"),
    }
}
