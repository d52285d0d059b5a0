//! Prints the relationship predicates for a few shape pairs.
//!
//! ```text
//! cargo run --example relate
//! RUST_LOG=georel=trace cargo run --example relate
//! ```

use georel::geometry::{Composite, Path, PathVertex, Polygon};
use georel::math::Point2;
use georel::{GeorelError, PointRelationship, Relationship};

fn polygon(points: &[(f64, f64)]) -> Result<Polygon, GeorelError> {
    Polygon::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
}

fn report<A, B>(name: &str, a: &A, b: &B) -> Result<(), GeorelError>
where
    A: Composite + ?Sized,
    B: Composite + ?Sized,
{
    let rel = Relationship::new(a, b);
    println!("{name}");
    println!("  intersect: {:?}", rel.intersect()?);
    println!("  cross:     {:?}", rel.cross()?);
    println!("  touch:     {:?}", rel.touch()?);
    println!("  coincide:  {} piece(s)", rel.coincide()?.len());
    println!("  block:     {:?}", rel.block()?);
    println!("  separate:  {:?}", rel.separate()?);
    println!("  contain:   {:?}", rel.contain()?);
    Ok(())
}

fn main() -> Result<(), GeorelError> {
    // Default: WARN for everything, INFO for georel.
    // Override with RUST_LOG env var (e.g. RUST_LOG=georel=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("georel=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let square = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])?;
    let corner = polygon(&[(4.0, 4.0), (6.0, 5.0), (5.0, 6.0)])?;
    let wedge = polygon(&[(2.0, 2.0), (6.0, 1.0), (6.0, 3.0)])?;
    let inner = polygon(&[(1.0, 1.0), (3.0, 1.0), (2.0, 3.0)])?;
    let arch = Path::from_bulge_vertices(&[PathVertex::new(1.0, 3.0, -1.0), PathVertex::line(3.0, 3.0)], false)?;
    let stub = Path::from_points(&[Point2::new(2.0, 6.0), Point2::new(2.0, 4.0)], false)?;

    report("square / shared corner", &square, &corner)?;
    report("square / wedge", &square, &wedge)?;
    report("square / inner triangle", &square, &inner)?;
    report("square / bulge arch", &square, &arch)?;
    report("square / stub", &square, &stub)?;

    let query = PointRelationship::new(Point2::new(2.0, 2.0), &square);
    println!("point (2, 2): on={} inside={:?}", query.on(), query.inside());
    Ok(())
}
