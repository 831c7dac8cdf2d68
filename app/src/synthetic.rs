use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal, NormalError, StandardNormal};
use thiserror::Error;

use splat_core::pointcloud::{ColumnBuffer, PointCloud, Property};
use splat_core::PointCloudError;

pub const POINT_ID: &str = "point_id";

// Standard 3DGS vertex layout, all f32. Normals are written as zeros.
const FLOAT_PROPERTIES: [&str; 17] = [
    "x", "y", "z", "nx", "ny", "nz", "f_dc_0", "f_dc_1", "f_dc_2", "opacity", "scale_0",
    "scale_1", "scale_2", "rot_0", "rot_1", "rot_2", "rot_3",
];

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("invalid distribution: {0}")]
    Distribution(#[from] NormalError),
    #[error(transparent)]
    Cloud(#[from] PointCloudError),
}

#[derive(Debug, Clone, Default)]
struct Splat {
    position: [f32; 3],
    color: [f32; 3],
    opacity: f32,
    scale: [f32; 3],
    rotation: [f32; 4],
}

impl Splat {
    // Same order as FLOAT_PROPERTIES
    fn columns(&self) -> [f32; 17] {
        let [x, y, z] = self.position;
        let [r, g, b] = self.color;
        let [s0, s1, s2] = self.scale;
        let [q0, q1, q2, q3] = self.rotation;
        [
            x, y, z, 0.0, 0.0, 0.0, r, g, b, self.opacity, s0, s1, s2, q0, q1, q2, q3,
        ]
    }
}

struct SplatSampler {
    spread: [Normal<f64>; 3],
    // opacity logits and log scales, as written by 3DGS trainers
    opacity: Normal<f64>,
    log_scale: Normal<f64>,
}

impl SplatSampler {
    fn new() -> Result<Self, NormalError> {
        Ok(SplatSampler {
            spread: [
                Normal::new(0.0, 5.0)?,
                Normal::new(0.0, 5.0)?,
                Normal::new(0.0, 2.0)?,
            ],
            opacity: Normal::new(0.0, 2.5)?,
            log_scale: Normal::new(-4.5, 1.0)?,
        })
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Splat {
        let mut rotation: [f32; 4] =
            std::array::from_fn(|_| rng.sample::<f64, _>(StandardNormal) as f32);
        let norm = rotation.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            rotation.iter_mut().for_each(|v| *v /= norm);
        } else {
            rotation = [1.0, 0.0, 0.0, 0.0];
        }

        Splat {
            position: std::array::from_fn(|i| self.spread[i].sample(rng) as f32),
            color: std::array::from_fn(|_| rng.gen_range(-1.0f32..1.0)),
            opacity: self.opacity.sample(rng) as f32,
            scale: std::array::from_fn(|_| self.log_scale.sample(rng) as f32),
            rotation,
        }
    }
}

/// Generates `count` splats deterministically from `seed`.
///
/// Besides the float layout, the cloud carries a `point_id` (u32) column and
/// an 8-bit `segment` column.
pub fn generate(count: usize, seed: u64) -> Result<PointCloud, GeneratorError> {
    let sampler = SplatSampler::new()?;
    let mut rng = StdRng::seed_from_u64(seed);
    let splats: Vec<[f32; 17]> = (0..count)
        .map(|_| sampler.sample(&mut rng).columns())
        .collect();

    let mut properties: Vec<Property> = FLOAT_PROPERTIES
        .iter()
        .enumerate()
        .map(|(column, &name)| {
            let values = splats.iter().map(|s| s[column]).collect();
            Property::new(name, ColumnBuffer::F32(values))
        })
        .collect();

    properties.push(Property::new(
        POINT_ID,
        ColumnBuffer::U32((0..count as u32).collect()),
    ));
    properties.push(Property::new(
        "segment",
        ColumnBuffer::U8(splats.iter().map(|s| u8::from(s[2] >= 0.0)).collect()),
    ));

    Ok(PointCloud::from_vertex_properties(count, properties)?)
}
