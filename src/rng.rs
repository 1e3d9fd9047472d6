//! Deterministic replay source for pack draws.

use rand::RngCore;

/// Bits per `f64` deviate as drawn by rand's `Standard` distribution.
const F64_PRECISION: u32 = 53;

/// An `RngCore` that replays a fixed list of unit deviates.
///
/// `rng.gen::<f64>()` on this source yields the scripted values in order
/// (each truncated to 53 bits). The script wraps around once exhausted; an
/// empty script yields zeros.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f64>,
    position: usize,
    consumed: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            position: 0,
            consumed: 0,
        }
    }

    /// Number of 64-bit words handed out so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    fn next_value(&mut self) -> f64 {
        self.consumed += 1;
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.position];
        self.position = (self.position + 1) % self.values.len();
        value
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.next_value().clamp(0.0, 1.0 - f64::EPSILON);
        let bits = (value * (1u64 << F64_PRECISION) as f64) as u64;
        bits << (64 - F64_PRECISION)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_replays_values_through_gen() {
        let mut rng = ScriptedRng::new(vec![0.0, 0.5, 0.25, 0.75]);
        assert_eq!(rng.gen::<f64>(), 0.0);
        assert_eq!(rng.gen::<f64>(), 0.5);
        assert_eq!(rng.gen::<f64>(), 0.25);
        assert_eq!(rng.gen::<f64>(), 0.75);
        assert_eq!(rng.consumed(), 4);
    }

    #[test]
    fn test_wraps_around() {
        let mut rng = ScriptedRng::new(vec![0.125]);
        assert_eq!(rng.gen::<f64>(), 0.125);
        assert_eq!(rng.gen::<f64>(), 0.125);
    }

    #[test]
    fn test_inexact_values_stay_close() {
        let mut rng = ScriptedRng::new(vec![0.93]);
        let value: f64 = rng.gen();
        assert!(value <= 0.93 && 0.93 - value < 1e-15, "got {value}");
    }

    #[test]
    fn test_one_stays_below_one() {
        let mut rng = ScriptedRng::new(vec![1.0]);
        let value: f64 = rng.gen();
        assert!(value < 1.0);
    }
}
