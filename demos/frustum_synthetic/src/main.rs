use argh::FromArgs;
use rand::Rng;
use std::path::PathBuf;

use frustum_proposal::{
    calib::{Calibration, CalibrationMap},
    BoundingBox2d, FrustumConfig, FrustumProposal,
};

#[derive(FromArgs)]
/// Extract frustum proposals from a synthetic point cloud
struct Args {
    /// path to a JSON calibration with the `P`, `Tr_velo_to_cam` and `R0_rect` entries
    #[argh(option)]
    calib_path: Option<PathBuf>,

    /// number of points to sample
    #[argh(option, default = "50_000")]
    num_points: usize,

    /// minimum forward distance of the points
    #[argh(option, default = "2.0")]
    clip_distance: f64,

    /// process the boxes in parallel
    #[argh(switch)]
    parallel: bool,
}

// KITTI object benchmark, training frame 000000
fn default_calibration() -> CalibrationMap {
    CalibrationMap {
        p: vec![
            7.215377e+02, 0.000000e+00, 6.095593e+02, 4.485728e+01, //
            0.000000e+00, 7.215377e+02, 1.728540e+02, 2.163791e-01, //
            0.000000e+00, 0.000000e+00, 1.000000e+00, 2.745884e-03,
        ],
        tr_velo_to_cam: vec![
            7.533745e-03, -9.999714e-01, -6.166020e-04, -4.069766e-03, //
            1.480249e-02, 7.280733e-04, -9.998902e-01, -7.631618e-02, //
            9.998621e-01, 7.523790e-03, 1.480755e-02, -2.717806e-01,
        ],
        r0_rect: vec![
            9.999239e-01, 9.837760e-03, -7.445048e-03, //
            -9.869795e-03, 9.999421e-01, -4.278459e-03, //
            7.402527e-03, 4.351614e-03, 9.999631e-01,
        ],
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let calib_map = match args.calib_path {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => default_calibration(),
    };
    let calib = Calibration::try_from(calib_map)?;

    let config = FrustumConfig::default()
        .with_clip_distance(args.clip_distance)
        .with_parallel(args.parallel);
    let extractor = FrustumProposal::new(calib, config);

    // sample a cloud around the car, like a 64 beam scan cropped to 80 meters
    let mut rng = rand::rng();
    let pc_velo = (0..args.num_points)
        .map(|_| {
            [
                rng.random_range(-80.0..80.0),
                rng.random_range(-80.0..80.0),
                rng.random_range(-2.5..1.5),
                rng.random_range(0.0..1.0),
            ]
        })
        .collect::<Vec<_>>();

    let boxes = vec![
        BoundingBox2d::new(712.4, 143.0, 810.73, 307.92),
        BoundingBox2d::new(387.63, 181.54, 423.81, 203.12),
        BoundingBox2d::new(0.0, 0.0, 10.0, 10.0),
    ];

    let now = std::time::Instant::now();
    let proposals = extractor.get_frustum_proposals((375, 1242, 3).into(), &boxes, &pc_velo);
    log::debug!("elapsed: {:?}", now.elapsed());

    for (i, (bbox, (rect, velo))) in boxes.iter().zip(proposals.iter()).enumerate() {
        println!(
            "Box #{i} {:?}: #{} points (rect), #{} points (velo)",
            bbox,
            rect.len(),
            velo.len()
        );
    }

    Ok(())
}
