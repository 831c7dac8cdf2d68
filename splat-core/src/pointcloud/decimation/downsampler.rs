use std::time::Instant;

use crate::error::DownsampleError;
use crate::pointcloud::cloud::{Element, PointCloud};

use super::{
    importance::ImportanceSelector,
    options::{DownsampleOptions, Method},
    random::RandomSelector,
    PointSelector,
};

fn selector_for(options: &DownsampleOptions) -> Box<dyn PointSelector> {
    match options.method {
        Method::Random => Box::new(RandomSelector { seed: options.seed }),
        Method::Importance => Box::new(ImportanceSelector),
    }
}

/// Source indices `downsample` would keep for `element`, sorted ascending.
pub fn select_indices(
    element: &Element,
    target: usize,
    options: &DownsampleOptions,
) -> Result<Vec<usize>, DownsampleError> {
    selector_for(options).select(element, target.min(element.count()))
}

/// Copies every column of `element` restricted to `indices`, keeping the
/// property order, kinds and byte sizes.
pub fn rebuild_element(element: &Element, indices: &[usize]) -> Element {
    let properties = element
        .properties()
        .iter()
        .map(|property| property.select(indices))
        .collect();
    Element::from_parts(element.name().to_string(), indices.len(), properties)
}

/// Reduces the per-point element of `cloud` to the resolved target count.
///
/// When the target is not below the current count the input is handed back
/// as is. Retained points keep their original relative order. Elements other
/// than the per-point one are passed through untouched.
///
/// Fails only when the cloud has no per-point element, or when the importance
/// method is chosen and `opacity`/`scale_0..2` are missing. Nothing is
/// allocated for the output before these checks pass.
pub fn downsample(
    cloud: PointCloud,
    options: &DownsampleOptions,
) -> Result<PointCloud, DownsampleError> {
    let position = cloud
        .vertex_position()
        .ok_or(DownsampleError::MissingElement)?;
    let element = &cloud.elements()[position];

    let original_count = element.count();
    let target = options.resolve_target(original_count);
    if target >= original_count {
        log::debug!(
            "target {} covers all {} points, nothing to do",
            target,
            original_count
        );
        return Ok(cloud);
    }

    log::info!(
        "downsampling {} -> {} points ({})",
        original_count,
        target,
        options.method
    );

    let start = Instant::now();
    let indices = select_indices(element, target, options)?;
    log::debug!("selected {} points in {:?}", indices.len(), start.elapsed());

    let start = Instant::now();
    let rebuilt = rebuild_element(element, &indices);
    log::debug!(
        "rebuilt {} properties in {:?}",
        rebuilt.properties().len(),
        start.elapsed()
    );

    Ok(cloud.replace_element(position, rebuilt))
}
