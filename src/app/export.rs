//! Result export for external analysis.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use glam::DVec3;
use serde::Serialize;

use idv_geometry::scene::SphericalBlockCollection;

/// Write `data` as JSON, gzipped when the file extension is `gz`.
pub fn write_json<T: Serialize>(data: &T, path: &Path) -> io::Result<()> {
    let _t = idv_geometry::util::Timed::info("Export");
    let file = File::create(path)?;

    let is_gzip = path.extension().map(|ext| ext == "gz").unwrap_or(false);

    if is_gzip {
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        serde_json::to_writer(&mut encoder, data)?;
        encoder.finish()?.flush()?;
    } else {
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, data)?;
        writer.flush()?;
    }

    log::info!("Wrote {}", path.display());
    Ok(())
}

#[derive(Serialize)]
pub struct BlocksExport {
    metadata: BlocksMetadata,
    left_edges: Vec<DVec3>,
    right_edges: Vec<DVec3>,
    normalized_left_edges: Vec<DVec3>,
    normalized_right_edges: Vec<DVec3>,
}

#[derive(Serialize)]
struct BlocksMetadata {
    num_blocks: usize,
    axis_order: String,
    angle_tolerance: f64,
    bounds_min: DVec3,
    bounds_max: DVec3,
    /// Column-major 4x4.
    normalization: [f64; 16],
}

impl BlocksExport {
    pub fn from_collection(collection: &SphericalBlockCollection, angle_tolerance: f64) -> Self {
        let bounds = collection.bounds();
        let normalized = collection.normalized_boxes();
        Self {
            metadata: BlocksMetadata {
                num_blocks: collection.len(),
                axis_order: collection.axis_order().to_string(),
                angle_tolerance,
                bounds_min: bounds.min,
                bounds_max: bounds.max,
                normalization: bounds.normalization_matrix().to_cols_array(),
            },
            left_edges: collection.boxes().iter().map(|b| b.min).collect(),
            right_edges: collection.boxes().iter().map(|b| b.max).collect(),
            normalized_left_edges: normalized.iter().map(|b| b.min).collect(),
            normalized_right_edges: normalized.iter().map(|b| b.max).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct SortExport {
    pub origin: DVec3,
    pub direction: DVec3,
    pub back_to_front: bool,
    pub points: Vec<DVec3>,
    pub distances: Vec<f64>,
    pub order: Vec<usize>,
}
