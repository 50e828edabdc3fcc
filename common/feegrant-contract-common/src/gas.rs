// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::error::FeegrantContractError;

/// Capability handle onto the ambient gas meter of the surrounding runtime.
/// Any allowance logic doing per-item work over unbounded user-provided lists
/// has to charge through this so that oversized lists are never free.
pub trait GasMeter {
    fn consume(
        &mut self,
        amount: u64,
        descriptor: &'static str,
    ) -> Result<(), FeegrantContractError>;
}

/// Meter without a ceiling that only tracks the total consumption.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrackingGasMeter {
    consumed: u64,
}

impl TrackingGasMeter {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn consumed(&self) -> u64 {
        self.consumed
    }
}

impl GasMeter for TrackingGasMeter {
    fn consume(
        &mut self,
        amount: u64,
        _descriptor: &'static str,
    ) -> Result<(), FeegrantContractError> {
        self.consumed = self.consumed.saturating_add(amount);
        Ok(())
    }
}

/// Meter that refuses any consumption beyond the provided ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitedGasMeter {
    limit: u64,
    consumed: u64,
}

impl LimitedGasMeter {
    pub fn new(limit: u64) -> Self {
        LimitedGasMeter { limit, consumed: 0 }
    }

    pub fn consumed(&self) -> u64 {
        self.consumed
    }
}

impl GasMeter for LimitedGasMeter {
    fn consume(
        &mut self,
        amount: u64,
        descriptor: &'static str,
    ) -> Result<(), FeegrantContractError> {
        let consumed = self.consumed.saturating_add(amount);
        if consumed > self.limit {
            return Err(FeegrantContractError::OutOfGas { descriptor });
        }
        self.consumed = consumed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_meter_accumulates() -> anyhow::Result<()> {
        let mut meter = TrackingGasMeter::new();
        meter.consume(10, "check msg")?;
        meter.consume(32, "check msg")?;
        assert_eq!(meter.consumed(), 42);
        Ok(())
    }

    #[test]
    fn limited_meter_refuses_past_the_ceiling() -> anyhow::Result<()> {
        let mut meter = LimitedGasMeter::new(25);
        meter.consume(10, "check msg")?;
        meter.consume(10, "check msg")?;

        let res = meter.consume(10, "check msg");
        assert_eq!(
            res,
            Err(FeegrantContractError::OutOfGas {
                descriptor: "check msg"
            })
        );

        // a failed charge doesn't count
        assert_eq!(meter.consumed(), 20);
        meter.consume(5, "check msg")?;
        assert_eq!(meter.consumed(), 25);
        Ok(())
    }
}
