use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sat_physics::{math::vec2::Vec2, PolygonDesc, World};

// --- Helper for building a column of boxes over a static floor ---
fn build_box_stack(num_boxes: usize) -> World {
    let mut world = World::with_timestep(1.0 / 60.0, -9.81).expect("valid timestep");
    world
        .create_polygon(
            PolygonDesc::rectangle(20.0, 1.0)
                .with_position(Vec2::new(0.0, -0.5))
                .with_static(true),
        )
        .expect("valid floor");

    for i in 0..num_boxes {
        let y_pos = 0.5 + i as f64 * 1.05; // Stack with slight gap
        world
            .create_polygon(
                PolygonDesc::rectangle(1.0, 1.0)
                    .with_position(Vec2::new(0.0, y_pos))
                    .with_gravity(true),
            )
            .expect("valid box");
    }
    world
}

// --- Helper for scattering rotated triangles across a grid ---
fn build_triangle_field(num_triangles: usize) -> World {
    let mut world = World::with_timestep(1.0 / 60.0, 0.0).expect("valid timestep");
    let columns = (num_triangles as f64).sqrt().ceil() as usize;
    let triangle = vec![Vec2::new(0.0, 0.6), Vec2::new(0.5, -0.3), Vec2::new(-0.5, -0.3)];

    for i in 0..num_triangles {
        let (col, row) = (i % columns, i / columns);
        let mut desc = PolygonDesc::new(triangle.clone())
            .with_position(Vec2::new(col as f64 * 0.9, row as f64 * 0.9))
            .with_rotation(i as f64 * 0.37);
        desc.mass = 1.0 + (i % 3) as f64;
        let handle = world.create_polygon(desc).expect("valid triangle");
        let velocity = Vec2::new(((i * 7) % 5) as f64 - 2.0, ((i * 3) % 5) as f64 - 2.0);
        world
            .polygon_mut(handle)
            .expect("just created")
            .set_velocity(velocity);
    }
    world
}

// Benchmark for a stack of boxes falling onto a floor
fn bench_box_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("box_stack");

    for num_boxes in [10, 50, 200].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_boxes), num_boxes, |b, &n| {
            b.iter(|| {
                let mut world = build_box_stack(black_box(n));
                // Half a second of simulated time
                world.update(black_box(0.5)).expect("valid delta");
            });
        });
    }
    group.finish();
}

// Benchmark for the all-pairs SAT pass on a crowded field
fn bench_triangle_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangle_field");

    for num_triangles in [10, 50, 200].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_triangles),
            num_triangles,
            |b, &n| {
                b.iter(|| {
                    let mut world = build_triangle_field(black_box(n));
                    world.update(black_box(0.5)).expect("valid delta");
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_box_stack, bench_triangle_field);
criterion_main!(benches);
