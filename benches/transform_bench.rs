use criterion::{black_box, criterion_group, criterion_main, Criterion};

use std::sync::Arc;

use reproj::factory::CrsFactory;
use reproj::transform::{Coord, CoordTransform};

fn bench_crs_construction(c: &mut Criterion) {
    c.bench_function("crs_from_proj_string", |b| {
        b.iter(|| {
            reproj::Crs::from_proj_string(
                "osgb",
                black_box(
                    "+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 +x_0=400000 +y_0=-100000 +ellps=airy +datum=OSGB36 +units=m +no_defs",
                ),
            )
            .unwrap()
        })
    });

    let factory = CrsFactory::new();
    factory.from_name("EPSG:27700").unwrap();
    c.bench_function("crs_factory_cached_lookup", |b| {
        b.iter(|| factory.from_name(black_box("EPSG:27700")).unwrap())
    });
}

fn bench_transform(c: &mut Criterion) {
    let factory = CrsFactory::new();
    let wgs84 = factory.from_name("EPSG:4326").unwrap();
    let osgb = factory.from_name("EPSG:27700").unwrap();
    let utm = factory.from_name("EPSG:32630").unwrap();

    let datum_shift = CoordTransform::new(Arc::clone(&wgs84), osgb);
    c.bench_function("transform_with_datum_shift", |b| {
        b.iter(|| datum_shift.apply(black_box(Coord::new(-2.89, 55.4))).unwrap())
    });

    let projection_only = CoordTransform::new(wgs84, utm);
    c.bench_function("transform_projection_only", |b| {
        b.iter(|| {
            projection_only
                .apply(black_box(Coord::new(-3.0, 55.4)))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_crs_construction, bench_transform);
criterion_main!(benches);
