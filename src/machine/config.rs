use std::time::Duration;

/// Tunables for the simulated hardware and payment gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineConfig {
    /// Probability that an inserted bill or coin is not registered.
    pub misread_probability: f64,
    /// Probability that a card payment is approved.
    pub card_approval_probability: f64,
    /// Simulated gateway latency for card payments.
    pub card_delay: Duration,
}

impl MachineConfig {
    pub const DEFAULT_MISREAD_PROBABILITY: f64 = 0.1;
    pub const DEFAULT_CARD_APPROVAL_PROBABILITY: f64 = 0.8;
    pub const DEFAULT_CARD_DELAY: Duration = Duration::from_millis(1500);

    /// No misreads, every card approved, no latency.
    pub fn reliable() -> Self {
        Self {
            misread_probability: 0.0,
            card_approval_probability: 1.0,
            card_delay: Duration::ZERO,
        }
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            misread_probability: Self::DEFAULT_MISREAD_PROBABILITY,
            card_approval_probability: Self::DEFAULT_CARD_APPROVAL_PROBABILITY,
            card_delay: Self::DEFAULT_CARD_DELAY,
        }
    }
}
