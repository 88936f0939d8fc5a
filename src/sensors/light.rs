//! LDR light intensity.
//!
//! The LDR sits on the high side of the divider, so the ADC count falls as
//! the compartment gets brighter. Intensity is therefore `1 − raw / 4095`.

/// Full-scale count of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

/// Map a raw ADC count to a light intensity in [0, 1].
pub fn intensity_from_raw(raw: u16) -> f32 {
    let normalized = f32::from(raw.min(ADC_MAX)) / f32::from(ADC_MAX);
    1.0 - normalized
}

/// Running sum of intensity samples between two reports.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntensityAccumulator {
    running_sum: f32,
    sample_count: u32,
}

impl IntensityAccumulator {
    pub const fn new() -> Self {
        Self {
            running_sum: 0.0,
            sample_count: 0,
        }
    }

    pub fn add(&mut self, intensity: f32) {
        self.running_sum += intensity;
        self.sample_count += 1;
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Average of the samples since the last call, then reset.
    /// `None` if nothing was sampled; the accumulator is left untouched.
    pub fn take_average(&mut self) -> Option<f32> {
        if self.sample_count == 0 {
            return None;
        }
        let avg = self.running_sum / self.sample_count as f32;
        *self = Self::new();
        Some(avg)
    }
}
