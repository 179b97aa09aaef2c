//! Notifications reported to the host.
//!
//! The state machine queues a notification whenever something the player
//! should be told about happens. Hosts drain the queue into a
//! `NotificationSink` and decide how to present it.

use serde::{Deserialize, Serialize};

/// Something the host should tell the player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notification {
    /// A pair was matched.
    PairFound { pairs_found: u32, pair_count: u32 },

    /// The countdown reached the warning threshold.
    LowTime { remaining: i64 },

    /// Every pair was found.
    SessionWon { elapsed_secs: u32 },

    /// The countdown ran out.
    TimeExpired { pairs_found: u32 },
}

impl Notification {
    /// Does this notification end the round?
    #[must_use]
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Notification::SessionWon { .. } | Notification::TimeExpired { .. }
        )
    }

    /// Player-facing text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Notification::PairFound {
                pairs_found,
                pair_count,
            } => format!("{pairs_found} out of {pair_count} pairs found"),
            Notification::LowTime { remaining } => format!("You have {remaining} seconds left"),
            Notification::SessionWon { elapsed_secs } => {
                format!("You win! You found them all in {elapsed_secs} seconds")
            }
            Notification::TimeExpired { pairs_found } => {
                format!("Time is up! You got {pairs_found} pairs.")
            }
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Receiver of notifications (status line, alert box, screen reader...).
pub trait NotificationSink {
    fn notify(&mut self, notification: &Notification);
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: &Notification) {
        self.push(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Notification::PairFound {
                pairs_found: 3,
                pair_count: 8
            }
            .message(),
            "3 out of 8 pairs found"
        );
        assert_eq!(
            Notification::LowTime { remaining: 30 }.to_string(),
            "You have 30 seconds left"
        );
        assert_eq!(
            Notification::SessionWon { elapsed_secs: 42 }.message(),
            "You win! You found them all in 42 seconds"
        );
        assert_eq!(
            Notification::TimeExpired { pairs_found: 5 }.message(),
            "Time is up! You got 5 pairs."
        );
    }

    #[test]
    fn test_is_final() {
        assert!(Notification::SessionWon { elapsed_secs: 1 }.is_final());
        assert!(Notification::TimeExpired { pairs_found: 0 }.is_final());
        assert!(!Notification::LowTime { remaining: 30 }.is_final());
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<Notification> = Vec::new();
        sink.notify(&Notification::LowTime { remaining: 30 });
        assert_eq!(sink, vec![Notification::LowTime { remaining: 30 }]);
    }
}
