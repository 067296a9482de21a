//! Bill splitting.
//!
//! A [`SplitSession`] holds a bill total and the people sharing it. Each
//! participant owns a percentage of the bill and a derived amount. The session
//! keeps three invariants after every transition:
//!
//! - percentages sum to 100 (within floating-point tolerance);
//! - every amount equals `total * percentage / 100`;
//! - there are never fewer than [`MIN_PARTICIPANTS`] participants.
//!
//! Transitions never touch the receiver: each one returns a new snapshot.
//!
//! ```rust
//! use engine::{SplitMode, SplitSession};
//!
//! let session = SplitSession::new().set_total("100");
//! let session = session.set_mode(SplitMode::Custom);
//! let you = session.participants()[0].id();
//! let session = session.set_percentage(you, 70.0).unwrap();
//!
//! assert!((session.participants()[1].amount() - 30.0).abs() < 1e-9);
//! ```

use std::{future::Future, time::Duration};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    notify::{Notifier, Toast},
    util::{Completion, simulated_delay},
};

/// A split can never shrink below this many participants.
pub const MIN_PARTICIPANTS: usize = 2;

/// How the bill is divided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Everybody pays the same share.
    #[default]
    Equal,
    /// Shares are set one participant at a time.
    Custom,
}

/// One party in a split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participant {
    id: Uuid,
    name: String,
    percentage: f64,
    amount: f64,
}

impl Participant {
    fn new(name: impl Into<String>, percentage: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            percentage,
            amount: 0.0,
        }
    }

    /// Stable identifier for the lifetime of the session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Share of the bill, in `[0, 100]`.
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Amount owed, always `total * percentage / 100`.
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// State of the split-bill screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitSession {
    total_input: String,
    total: f64,
    description: String,
    mode: SplitMode,
    participants: Vec<Participant>,
}

impl Default for SplitSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitSession {
    /// Fresh session: "You" and "Friend" sharing an empty bill equally.
    pub fn new() -> Self {
        Self {
            total_input: String::new(),
            total: 0.0,
            description: String::new(),
            mode: SplitMode::Equal,
            participants: vec![Participant::new("You", 50.0), Participant::new("Friend", 50.0)],
        }
    }

    /// The total exactly as it was typed.
    pub fn total_input(&self) -> &str {
        &self.total_input
    }

    /// Numeric total used for amounts; invalid input counts as zero.
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn mode(&self) -> SplitMode {
        self.mode
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: Uuid) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn percentage_sum(&self) -> f64 {
        self.participants.iter().map(|p| p.percentage).sum()
    }

    /// A request can only be sent for a positive total.
    pub fn can_submit(&self) -> bool {
        self.total > 0.0
    }

    /// Switch split mode.
    ///
    /// `Equal` gives everybody `100 / count`. `Custom` keeps the current
    /// shares, renormalized to sum to 100.
    #[must_use]
    pub fn set_mode(&self, mode: SplitMode) -> Self {
        let mut next = self.clone();
        next.mode = mode;
        next.redistribute();
        next
    }

    /// Store the typed total and recompute every amount. Percentages are kept.
    #[must_use]
    pub fn set_total(&self, input: &str) -> Self {
        let mut next = self.clone();
        next.total_input = input.to_string();
        next.total = parse_total(input);
        next.refresh_amounts();
        next
    }

    /// Numeric flavour of [`set_total`](Self::set_total).
    #[must_use]
    pub fn set_total_value(&self, total: f64) -> Self {
        self.set_total(&total.to_string())
    }

    #[must_use]
    pub fn set_description(&self, description: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.description = description.into();
        next
    }

    /// Append `Person N` with a zero share, then redistribute for the mode.
    #[must_use]
    pub fn add_participant(&self) -> Self {
        let mut next = self.clone();
        let name = format!("Person {}", next.participants.len() + 1);
        next.participants.push(Participant::new(name, 0.0));
        next.redistribute();
        tracing::debug!(count = next.participants.len(), "participant added");
        next
    }

    /// Remove a participant and redistribute for the mode.
    ///
    /// Silently ignored when only [`MIN_PARTICIPANTS`] are left.
    #[must_use]
    pub fn remove_participant(&self, id: Uuid) -> Self {
        let mut next = self.clone();
        if next.participants.len() <= MIN_PARTICIPANTS {
            return next;
        }
        next.participants.retain(|p| p.id != id);
        next.redistribute();
        next
    }

    /// Move one participant's slider in custom mode.
    ///
    /// The others keep their relative proportions and are rescaled to share
    /// `100 - percentage`. When all of them sit at zero the remainder is
    /// split equally among them. Values outside `[0, 100]` are clamped.
    pub fn set_percentage(&self, id: Uuid, percentage: f64) -> ResultEngine<Self> {
        if self.mode != SplitMode::Custom {
            return Err(EngineError::InvalidSplit(
                "percentages can only be set in custom mode".to_string(),
            ));
        }
        if percentage.is_nan() {
            return Err(EngineError::InvalidAmount("percentage is not a number".to_string()));
        }
        let target = self.position(id)?;
        let percentage = percentage.clamp(0.0, 100.0);

        let mut next = self.clone();
        let remaining = 100.0 - percentage;
        let others_sum: f64 = next
            .participants
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != target)
            .map(|(_, p)| p.percentage)
            .sum();
        let others = (next.participants.len() - 1) as f64;

        for (idx, participant) in next.participants.iter_mut().enumerate() {
            participant.percentage = if idx == target {
                percentage
            } else if others_sum > 0.0 {
                participant.percentage * remaining / others_sum
            } else {
                remaining / others
            };
        }
        next.refresh_amounts();
        Ok(next)
    }

    /// Rename a participant. Shares are untouched.
    pub fn set_name(&self, id: Uuid, name: impl Into<String>) -> ResultEngine<Self> {
        let target = self.position(id)?;
        let mut next = self.clone();
        next.participants[target].name = name.into();
        Ok(next)
    }

    /// Build the request to send for this split.
    pub fn request(&self) -> ResultEngine<SplitRequest> {
        if !self.can_submit() {
            return Err(EngineError::InvalidAmount(
                "the bill total must be greater than zero".to_string(),
            ));
        }
        Ok(SplitRequest {
            total_input: self.total_input.clone(),
            total: self.total,
            description: self.description.clone(),
            shares: self
                .participants
                .iter()
                .map(|p| Share {
                    name: p.name.clone(),
                    percentage: p.percentage,
                    amount: p.amount,
                })
                .collect(),
        })
    }

    fn position(&self, id: Uuid) -> ResultEngine<usize> {
        self.participants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
    }

    fn redistribute(&mut self) {
        match self.mode {
            SplitMode::Equal => self.distribute_equally(),
            SplitMode::Custom => {
                let sum = self.percentage_sum();
                if sum > 0.0 {
                    for participant in &mut self.participants {
                        participant.percentage = participant.percentage / sum * 100.0;
                    }
                    self.refresh_amounts();
                } else {
                    self.distribute_equally();
                }
            }
        }
    }

    fn distribute_equally(&mut self) {
        let share = 100.0 / self.participants.len() as f64;
        for participant in &mut self.participants {
            participant.percentage = share;
        }
        self.refresh_amounts();
    }

    fn refresh_amounts(&mut self) {
        let total = self.total;
        for participant in &mut self.participants {
            // Scale the share first so large totals stay finite.
            participant.amount = total * (participant.percentage / 100.0);
        }
    }
}

fn parse_total(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        // `-0` passes the check above; store it as a plain zero.
        .map(|value| value + 0.0)
        .unwrap_or(0.0)
}

/// One line of a split request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    pub name: String,
    pub percentage: f64,
    pub amount: f64,
}

/// Snapshot of a split, ready to be sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRequest {
    pub total_input: String,
    pub total: f64,
    pub description: String,
    pub shares: Vec<Share>,
}

/// Pretend to send a split request.
///
/// After `delay` the notifier gets a "Split Request Sent" toast. Nothing is
/// sent if `cancelled` resolves first.
pub async fn send_request<N: Notifier>(
    request: &SplitRequest,
    notifier: &N,
    delay: Duration,
    cancelled: impl Future<Output = ()>,
) -> Completion {
    let completion = simulated_delay(delay, cancelled).await;
    match completion {
        Completion::Done => {
            tracing::info!(
                total = request.total,
                shares = request.shares.len(),
                "split request sent"
            );
            notifier.notify(Toast::new(
                "Split Request Sent",
                format!("Bill split request for ${} has been sent", request.total_input),
            ));
        }
        Completion::Cancelled => tracing::debug!("split request cancelled"),
    }
    completion
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_consistent(session: &SplitSession) {
        assert!(session.participants().len() >= MIN_PARTICIPANTS);
        assert!(
            (session.percentage_sum() - 100.0).abs() < EPS,
            "sum was {}",
            session.percentage_sum()
        );
        for p in session.participants() {
            assert!((p.amount() - session.total() * p.percentage() / 100.0).abs() < EPS);
        }
    }

    #[test]
    fn new_session_is_an_even_pair() {
        let session = SplitSession::new();
        assert_eq!(session.mode(), SplitMode::Equal);
        assert_eq!(session.participants()[0].name(), "You");
        assert_eq!(session.participants()[1].name(), "Friend");
        assert_eq!(session.total(), 0.0);
        assert!(!session.can_submit());
        assert_consistent(&session);
    }

    #[test]
    fn total_input_is_kept_verbatim_but_invalid_counts_as_zero() {
        let session = SplitSession::new().set_total("12abc");
        assert_eq!(session.total_input(), "12abc");
        assert_eq!(session.total(), 0.0);
        assert!(session.participants().iter().all(|p| p.amount() == 0.0));

        assert_eq!(SplitSession::new().set_total("").total(), 0.0);
        assert_eq!(SplitSession::new().set_total("-5").total(), 0.0);
        assert_eq!(SplitSession::new().set_total("inf").total(), 0.0);
        assert_eq!(SplitSession::new().set_total(" 42.5 ").total(), 42.5);
        assert_eq!(SplitSession::new().set_total_value(12.5).total_input(), "12.5");
        assert_eq!(SplitSession::new().set_total_value(f64::NAN).total(), 0.0);
    }

    #[test]
    fn set_total_keeps_percentages() {
        let session = SplitSession::new().set_mode(SplitMode::Custom);
        let you = session.participants()[0].id();
        let session = session.set_percentage(you, 80.0).unwrap().set_total("50");
        assert!((session.participants()[0].percentage() - 80.0).abs() < EPS);
        assert!((session.participants()[0].amount() - 40.0).abs() < EPS);
        assert!((session.participants()[1].amount() - 10.0).abs() < EPS);
    }

    #[test]
    fn transitions_do_not_touch_the_previous_snapshot() {
        let before = SplitSession::new().set_total("100");
        let after = before.add_participant();
        assert_eq!(before.participants().len(), 2);
        assert_eq!(after.participants().len(), 3);
        assert!((before.participants()[0].amount() - 50.0).abs() < EPS);
    }

    #[test]
    fn add_in_custom_mode_leaves_newcomer_at_zero() {
        let session = SplitSession::new().set_total("100").set_mode(SplitMode::Custom);
        let you = session.participants()[0].id();
        let session = session.set_percentage(you, 60.0).unwrap().add_participant();

        let shares: Vec<f64> = session.participants().iter().map(|p| p.percentage()).collect();
        assert!((shares[0] - 60.0).abs() < EPS);
        assert!((shares[1] - 40.0).abs() < EPS);
        assert_eq!(shares[2], 0.0);
        assert_eq!(session.participants()[2].name(), "Person 3");
        assert_consistent(&session);
    }

    #[test]
    fn remove_in_custom_mode_renormalizes() {
        let session = SplitSession::new()
            .set_total("90")
            .add_participant()
            .set_mode(SplitMode::Custom);
        let third = session.participants()[2].id();
        let session = session.remove_participant(third);
        assert_eq!(session.participants().len(), 2);
        for p in session.participants() {
            assert!((p.percentage() - 50.0).abs() < EPS);
            assert!((p.amount() - 45.0).abs() < EPS);
        }
    }

    #[test]
    fn remove_unknown_id_keeps_everyone() {
        let session = SplitSession::new().add_participant();
        let session = session.remove_participant(Uuid::new_v4());
        assert_eq!(session.participants().len(), 3);
        assert_consistent(&session);
    }

    #[test]
    fn custom_mode_falls_back_to_equal_when_all_zero() {
        let mut session = SplitSession::new().add_participant();
        for p in &mut session.participants {
            p.percentage = 0.0;
        }
        let session = session.set_mode(SplitMode::Custom);
        for p in session.participants() {
            assert!((p.percentage() - 100.0 / 3.0).abs() < EPS);
        }
    }

    #[test]
    fn setting_percentage_requires_custom_mode() {
        let session = SplitSession::new();
        let you = session.participants()[0].id();
        assert!(matches!(
            session.set_percentage(you, 70.0),
            Err(EngineError::InvalidSplit(_))
        ));
    }

    #[test]
    fn setting_percentage_rejects_unknown_ids_and_nan() {
        let session = SplitSession::new().set_mode(SplitMode::Custom);
        let missing = Uuid::new_v4();
        assert_eq!(
            session.set_percentage(missing, 10.0),
            Err(EngineError::KeyNotFound(missing.to_string()))
        );
        let you = session.participants()[0].id();
        assert!(matches!(
            session.set_percentage(you, f64::NAN),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn setting_percentage_clamps_out_of_range_values() {
        let session = SplitSession::new().set_mode(SplitMode::Custom);
        let you = session.participants()[0].id();
        let session = session.set_percentage(you, 150.0).unwrap();
        assert_eq!(session.participants()[0].percentage(), 100.0);
        assert_eq!(session.participants()[1].percentage(), 0.0);
        assert_consistent(&session);
    }

    #[test]
    fn remainder_is_shared_when_others_are_all_zero() {
        let session = SplitSession::new()
            .set_total("100")
            .add_participant()
            .set_mode(SplitMode::Custom);
        let you = session.participants()[0].id();
        let session = session.set_percentage(you, 100.0).unwrap();
        assert_consistent(&session);

        let session = session.set_percentage(you, 40.0).unwrap();
        assert!((session.participants()[1].percentage() - 30.0).abs() < EPS);
        assert!((session.participants()[2].percentage() - 30.0).abs() < EPS);
        assert!((session.participants()[2].amount() - 30.0).abs() < EPS);
        assert_consistent(&session);
    }

    #[test]
    fn rename_keeps_shares() {
        let session = SplitSession::new().set_total("10");
        let friend = session.participants()[1].id();
        let renamed = session.set_name(friend, "Alex").unwrap();
        assert_eq!(renamed.participant(friend).unwrap().name(), "Alex");
        assert_eq!(
            renamed.participant(friend).unwrap().amount(),
            session.participant(friend).unwrap().amount()
        );
        assert!(matches!(
            session.set_name(Uuid::new_v4(), "Nobody"),
            Err(EngineError::KeyNotFound(_))
        ));
    }

    #[test]
    fn request_needs_a_positive_total() {
        assert!(SplitSession::new().request().is_err());
        assert!(SplitSession::new().set_total("0").request().is_err());

        let request = SplitSession::new()
            .set_total("42.30")
            .set_description("Dinner with friends")
            .request()
            .unwrap();
        assert_eq!(request.total_input, "42.30");
        assert_eq!(request.description, "Dinner with friends");
        assert_eq!(request.shares.len(), 2);
        assert!((request.shares[0].amount - 21.15).abs() < EPS);
    }

    #[test]
    fn huge_totals_give_finite_amounts() {
        let session = SplitSession::new().set_total("1e307");
        for p in session.participants() {
            assert!(p.amount().is_finite(), "amount was {}", p.amount());
            assert!((p.amount() - 5e306).abs() <= 5e306 * EPS);
        }
        let custom = session.set_mode(SplitMode::Custom);
        let you = custom.participants()[0].id();
        let custom = custom.set_percentage(you, 100.0).unwrap();
        assert_eq!(custom.participants()[0].amount(), 1e307);
    }

    #[test]
    fn negative_zero_total_is_plain_zero() {
        let session = SplitSession::new().set_total("-0");
        assert_eq!(session.total_input(), "-0");
        assert!(session.total().is_sign_positive());
        for p in session.participants() {
            assert!(p.amount().is_sign_positive());
        }
        assert!(!session.can_submit());
    }
}
