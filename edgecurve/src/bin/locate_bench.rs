use edgecurve::config::{CurveConfig, LocatorConfig};
use edgecurve::{closest_parameter, closest_point_on_curve, compute_path, Point, SampledCubic, Side};
use std::time::Instant;

// Routed edges between a fixed source and targets fanned out on a grid
fn build_paths(count: usize) -> Vec<SampledCubic> {
    let cfg = CurveConfig::default();
    let source = Point::new(0.0, 0.0);
    let mut paths = Vec::with_capacity(count);
    for k in 0..count {
        let target = Point::new((k % 40) as f32 * 25.0 - 500.0, (k / 40 % 40) as f32 * 20.0 + 60.0);
        let ss = Side::ALL[k % 4];
        let ts = Side::ALL[(k / 4) % 4];
        if let Ok(edge) = compute_path(source, ss, target, ts, None, &cfg) {
            paths.push(SampledCubic::new(edge.bezier));
        }
    }
    paths
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut path_count = 500usize;
    let mut queries = 20usize;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val) = a.strip_prefix("--paths=") {
            if let Ok(v) = val.parse() {
                path_count = v;
            }
        } else if let Some(val) = a.strip_prefix("--queries=") {
            if let Ok(v) = val.parse() {
                queries = v;
            }
        } else if let Some(val) = a.strip_prefix("--assert-ms=") {
            if let Ok(v) = val.parse() {
                assert_ms = Some(v);
            }
        }
    }

    let locator = LocatorConfig::default();
    let t_build = Instant::now();
    let paths = build_paths(path_count);
    let build_ms = t_build.elapsed().as_secs_f64() * 1000.0;

    let mut point_ms: Vec<f64> = Vec::with_capacity(paths.len() * queries);
    let mut param_ms: Vec<f64> = Vec::with_capacity(paths.len() * queries);
    let mut errors = 0usize;
    for (i, path) in paths.iter().enumerate() {
        for q in 0..queries {
            let query = Point::new((q * 37 % 500) as f32 - 250.0, (i * 13 % 400) as f32);

            let t0 = Instant::now();
            if closest_point_on_curve(path, query, &locator).is_err() {
                errors += 1;
            }
            point_ms.push(t0.elapsed().as_secs_f64() * 1000.0);

            let t0 = Instant::now();
            if closest_parameter(path, query, locator.tolerance).is_err() {
                errors += 1;
            }
            param_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
        }
    }
    point_ms.sort_by(|a, b| a.total_cmp(b));
    param_ms.sort_by(|a, b| a.total_cmp(b));

    let med = percentile(&point_ms, 0.5);
    println!(
        "paths={} queries={} errors={} build_ms={:.3} closest_point median_ms={:.4} p90_ms={:.4} p99_ms={:.4} closest_parameter median_ms={:.4} p99_ms={:.4}",
        paths.len(),
        queries,
        errors,
        build_ms,
        med,
        percentile(&point_ms, 0.9),
        percentile(&point_ms, 0.99),
        percentile(&param_ms, 0.5),
        percentile(&param_ms, 0.99),
    );
    if let Some(th) = assert_ms {
        if med > th {
            eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th);
            std::process::exit(1);
        }
    }
}
