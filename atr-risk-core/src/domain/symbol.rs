use serde::{Deserialize, Serialize};

/// Traded symbol metadata as the host reports it.
///
/// `pip_value` is the account-currency value of a one-pip move for one unit
/// of volume. Volumes are expressed in units, not lots; `lot_size` is the
/// number of units in one lot and is informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolSpec {
    pub name: String,
    pub pip_size: f64,
    pub pip_value: f64,
    pub lot_size: f64,
    pub volume_min: f64,
    pub volume_max: f64,
    pub volume_step: f64,
}

impl Default for SymbolSpec {
    fn default() -> Self {
        Self {
            name: "EURUSD".into(),
            pip_size: 0.0001,
            pip_value: 0.0001,
            lot_size: 100_000.0,
            volume_min: 1_000.0,
            volume_max: 10_000_000.0,
            volume_step: 1_000.0,
        }
    }
}

impl SymbolSpec {
    /// Round a raw volume to the nearest step and clamp it into
    /// `[volume_min, volume_max]`.
    ///
    /// Non-positive or non-finite input yields `0.0`: there is nothing to
    /// trade, and clamping up to the minimum would invent risk.
    pub fn normalize_volume(&self, raw: f64) -> f64 {
        if !raw.is_finite() || raw <= 0.0 {
            return 0.0;
        }
        let steps = (raw / self.volume_step).round();
        let stepped = steps * self.volume_step;
        stepped.clamp(self.volume_min, self.volume_max)
    }

    /// Checks the fields a host would never report as zero or negative.
    pub fn invalid_field(&self) -> Option<(&'static str, f64)> {
        let fields = [
            ("pip_size", self.pip_size),
            ("pip_value", self.pip_value),
            ("lot_size", self.lot_size),
            ("volume_step", self.volume_step),
            ("volume_max", self.volume_max),
        ];
        if let Some(bad) = fields.iter().find(|(_, v)| !v.is_finite() || *v <= 0.0) {
            return Some(*bad);
        }
        if !self.volume_min.is_finite() || self.volume_min < 0.0 || self.volume_min > self.volume_max {
            return Some(("volume_min", self.volume_min));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rounds_to_nearest_step() {
        let spec = SymbolSpec::default();
        assert_eq!(spec.normalize_volume(41_666.0), 42_000.0);
        assert_eq!(spec.normalize_volume(41_400.0), 41_000.0);
    }

    #[test]
    fn normalize_clamps_to_bounds() {
        let spec = SymbolSpec::default();
        assert_eq!(spec.normalize_volume(12.0), 1_000.0);
        assert_eq!(spec.normalize_volume(1e12), 10_000_000.0);
    }

    #[test]
    fn normalize_degenerate_is_zero() {
        let spec = SymbolSpec::default();
        assert_eq!(spec.normalize_volume(0.0), 0.0);
        assert_eq!(spec.normalize_volume(-5.0), 0.0);
        assert_eq!(spec.normalize_volume(f64::NAN), 0.0);
        assert_eq!(spec.normalize_volume(f64::INFINITY), 0.0);
    }

    #[test]
    fn invalid_field_reports_first_offender() {
        let mut spec = SymbolSpec::default();
        assert_eq!(spec.invalid_field(), None);
        spec.pip_value = 0.0;
        assert_eq!(spec.invalid_field(), Some(("pip_value", 0.0)));
        spec.pip_value = 1.0;
        spec.volume_min = spec.volume_max + 1.0;
        assert!(matches!(spec.invalid_field(), Some(("volume_min", _))));
    }
}
