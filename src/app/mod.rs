pub mod export;

use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use idv_geometry::config::GeometryConfig;
use idv_geometry::geometry::AxisOrder;
use idv_geometry::ordering::{DrawOrder, RaySorter};
use idv_geometry::scene::{ShellGrid, SphericalBlockCollection};
use idv_geometry::util::{parse_count, Timed};

use export::{write_json, BlocksExport, SortExport};

pub type AppResult = Result<(), Box<dyn Error>>;

/// Parse a vector given as `x,y,z`.
pub fn parse_vec3(s: &str) -> Result<DVec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Invalid vector '{}': {}", s, e))?;
    match parts[..] {
        [x, y, z] => Ok(DVec3::new(x, y, z)),
        _ => Err(format!("Invalid vector '{}': expected x,y,z", s)),
    }
}

#[derive(Args, Debug)]
pub struct BboxesArgs {
    /// Inner radius of the shell
    #[arg(long, default_value_t = 0.4)]
    pub r_min: f64,

    /// Outer radius of the shell
    #[arg(long, default_value_t = 1.0)]
    pub r_max: f64,

    /// Number of radial cells
    #[arg(long, default_value_t = 8)]
    pub n_r: usize,

    /// Number of colatitude cells
    #[arg(long, default_value_t = 16)]
    pub n_theta: usize,

    /// Number of azimuthal cells
    #[arg(long, default_value_t = 32)]
    pub n_phi: usize,

    /// Native axis order of the generated edges (overrides the config file)
    #[arg(long, value_name = "ORDER")]
    pub axis_order: Option<AxisOrder>,

    /// Export boxes to file (supports .json and .json.gz)
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}

pub fn run_bboxes(args: &BboxesArgs, config: &GeometryConfig) -> AppResult {
    if !(args.r_min >= 0.0 && args.r_min < args.r_max) {
        return Err(format!("need 0 <= r-min < r-max, got {}..{}", args.r_min, args.r_max).into());
    }

    let order = match args.axis_order {
        Some(order) => order,
        None => config.axis_order()?,
    };

    let grid = ShellGrid::new(args.r_min, args.r_max, args.n_r, args.n_theta, args.n_phi);
    let (left, right) = grid.native_edges(order);

    let collection = {
        let _t = Timed::info("Cartesian bounds").items(grid.num_cells());
        SphericalBlockCollection::from_native_edges(&left, &right, order, &config.bounds)?
    };

    let bounds = collection.bounds();
    println!(
        "{} blocks ({} x {} x {}), axis order {}",
        collection.len(),
        args.n_r,
        args.n_theta,
        args.n_phi,
        order
    );
    println!("  min:      {:?}", bounds.min);
    println!("  max:      {:?}", bounds.max);
    println!("  extent:   {:?}", bounds.extent());
    println!("  diagonal: {:.6}", bounds.diagonal());

    if let Some(path) = &args.export {
        let data = BlocksExport::from_collection(&collection, config.bounds.angle_tolerance);
        write_json(&data, path)?;
    }
    Ok(())
}

#[derive(Args, Debug)]
pub struct SortArgs {
    /// Number of random points (e.g., 1000, 100k, 1m)
    #[arg(long, value_parser = parse_count, default_value = "1000")]
    pub count: usize,

    /// Random seed
    #[arg(short, long, default_value_t = 12345)]
    pub seed: u64,

    /// Ray origin as x,y,z
    #[arg(long, value_parser = parse_vec3, conflicts_with = "camera")]
    pub origin: Option<DVec3>,

    /// Ray direction as x,y,z (normalized before use)
    #[arg(long, value_parser = parse_vec3, conflicts_with = "camera")]
    pub direction: Option<DVec3>,

    /// Camera position as x,y,z; the ray points at --focus
    #[arg(long, value_parser = parse_vec3)]
    pub camera: Option<DVec3>,

    /// Camera focus as x,y,z
    #[arg(long, value_parser = parse_vec3, requires = "camera")]
    pub focus: Option<DVec3>,

    /// Nearest points first instead of farthest first
    #[arg(long)]
    pub front_to_back: bool,

    /// Export points and draw order to file (supports .json and .json.gz)
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}

impl SortArgs {
    fn sorter(&self) -> Result<RaySorter, Box<dyn Error>> {
        if let Some(camera) = self.camera {
            return Ok(RaySorter::from_camera(camera, self.focus.unwrap_or(DVec3::ZERO))?);
        }
        let direction = self.direction.unwrap_or(DVec3::Z);
        let unit = direction
            .try_normalize()
            .ok_or_else(|| format!("ray direction {:?} has no length", direction))?;
        Ok(RaySorter::new(self.origin.unwrap_or(DVec3::ZERO), unit))
    }

    fn draw_order(&self) -> DrawOrder {
        DrawOrder::from(!self.front_to_back)
    }
}

pub fn random_points(n: usize, seed: u64) -> Vec<DVec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            DVec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            )
        })
        .collect()
}

pub fn run_sort(args: &SortArgs, config: &GeometryConfig) -> AppResult {
    let sorter = args
        .sorter()?
        .with_parallel_threshold(config.sort_parallel_threshold);
    let points = random_points(args.count, args.seed);

    let (distances, order) = {
        let _t = Timed::info("Ray sort").items(points.len());
        (sorter.distances(&points), sorter.sort(&points, args.draw_order()))
    };

    println!(
        "{} points along {:?} from {:?} ({:?})",
        points.len(),
        sorter.direction,
        sorter.origin,
        args.draw_order()
    );
    if let (Some(&first), Some(&last)) = (order.first(), order.last()) {
        println!("  first: #{} at t = {:.6}", first, distances[first]);
        println!("  last:  #{} at t = {:.6}", last, distances[last]);
    }

    if let Some(path) = &args.export {
        let data = SortExport {
            origin: sorter.origin,
            direction: sorter.direction,
            back_to_front: !args.front_to_back,
            points,
            distances,
            order,
        };
        write_json(&data, path)?;
    }
    Ok(())
}
