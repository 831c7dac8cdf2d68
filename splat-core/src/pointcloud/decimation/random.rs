use crate::error::DownsampleError;
use crate::pointcloud::cloud::Element;

use super::PointSelector;

const LCG_MULTIPLIER: u64 = 1_103_515_245;
const LCG_INCREMENT: u64 = 12_345;
const LCG_MODULUS: u64 = (1 << 31) - 1;

/// Linear congruential generator yielding floats in `[0, 1)`.
///
/// The same seed always yields the same stream.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: i64) -> Self {
        Lcg {
            state: seed.rem_euclid(LCG_MODULUS as i64) as u64,
        }
    }

    /// Seeded from the current time. Not reproducible.
    pub fn from_wall_clock() -> Self {
        Self::new(chrono::Utc::now().timestamp_millis())
    }

    pub fn next_f64(&mut self) -> f64 {
        // state < 2^31 and the multiplier < 2^31, so the product fits in u64
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }
}

/// Partial Fisher-Yates shuffle over `0..count`, stopped after `target` swaps.
/// The returned indices are sorted ascending.
pub fn shuffle_select(count: usize, target: usize, rng: &mut Lcg) -> Vec<usize> {
    let target = target.min(count);
    let mut indices: Vec<usize> = (0..count).collect();

    for i in 0..target {
        let offset = (rng.next_f64() * (count - i) as f64).floor() as usize;
        let j = (i + offset).min(count - 1);
        indices.swap(i, j);
    }

    indices.truncate(target);
    indices.sort_unstable();
    indices
}

pub struct RandomSelector {
    pub seed: Option<i64>,
}

impl PointSelector for RandomSelector {
    fn select(&self, element: &Element, target: usize) -> Result<Vec<usize>, DownsampleError> {
        let mut rng = match self.seed {
            Some(seed) => Lcg::new(seed),
            None => {
                log::debug!("no seed given, random selection is not reproducible");
                Lcg::from_wall_clock()
            }
        };
        Ok(shuffle_select(element.count(), target, &mut rng))
    }
}
