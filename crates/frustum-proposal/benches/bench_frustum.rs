use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use std::hint::black_box;

use frustum_proposal::{calib::Calibration, BoundingBox2d, FrustumConfig, FrustumProposal};

const KITTI_P2: [f64; 12] = [
    7.215377e+02, 0.000000e+00, 6.095593e+02, 4.485728e+01, //
    0.000000e+00, 7.215377e+02, 1.728540e+02, 2.163791e-01, //
    0.000000e+00, 0.000000e+00, 1.000000e+00, 2.745884e-03,
];
const KITTI_TR_VELO_TO_CAM: [f64; 12] = [
    7.533745e-03, -9.999714e-01, -6.166020e-04, -4.069766e-03, //
    1.480249e-02, 7.280733e-04, -9.998902e-01, -7.631618e-02, //
    9.998621e-01, 7.523790e-03, 1.480755e-02, -2.717806e-01,
];
const KITTI_R0_RECT: [f64; 9] = [
    9.999239e-01, 9.837760e-03, -7.445048e-03, //
    -9.869795e-03, 9.999421e-01, -4.278459e-03, //
    7.402527e-03, 4.351614e-03, 9.999631e-01,
];

fn random_cloud(num_points: usize) -> Vec<[f64; 4]> {
    let mut rng = rand::rng();
    (0..num_points)
        .map(|_| {
            [
                rng.random_range(-20.0..80.0),
                rng.random_range(-40.0..40.0),
                rng.random_range(-2.0..2.0),
                rng.random_range(0.0..1.0),
            ]
        })
        .collect()
}

fn random_boxes(num_boxes: usize) -> Vec<BoundingBox2d> {
    let mut rng = rand::rng();
    (0..num_boxes)
        .map(|_| {
            let x = rng.random_range(0.0..1100.0);
            let y = rng.random_range(0.0..300.0);
            BoundingBox2d::new(x, y, x + 140.0, y + 75.0)
        })
        .collect()
}

fn bench_frustum(c: &mut Criterion) {
    let mut group = c.benchmark_group("FrustumProposal");

    let calib = match Calibration::new(&KITTI_P2, &KITTI_TR_VELO_TO_CAM, &KITTI_R0_RECT) {
        Ok(calib) => calib,
        Err(e) => panic!("invalid benchmark calibration: {e}"),
    };
    let cloud = random_cloud(120_000);

    for num_boxes in [1, 8, 32].iter() {
        let boxes = random_boxes(*num_boxes);
        group.throughput(criterion::Throughput::Elements(*num_boxes as u64));

        for parallel in [false, true] {
            let extractor = FrustumProposal::new(
                calib.clone(),
                FrustumConfig::default().with_parallel(parallel),
            );
            let name = if parallel { "parallel" } else { "sequential" };

            group.bench_with_input(
                BenchmarkId::new(name, num_boxes),
                &(&extractor, &boxes, &cloud),
                |b, i| {
                    let (extractor, boxes, cloud) = (i.0, i.1, i.2);
                    b.iter(|| {
                        black_box(extractor.get_frustum_proposals(
                            (375, 1242, 3).into(),
                            boxes,
                            cloud,
                        ))
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_frustum);
criterion_main!(benches);
