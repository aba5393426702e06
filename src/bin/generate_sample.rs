use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use plotdata::data::model::{Dataset, DatasetBuilder};
use plotdata::data::naming::{DatasetRole, PlotDataName};
use plotdata::data::writer::write_file;

/// Write deterministic plot dumps for trying out the reader.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Directory the plot_data_*.txt files are written to
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,

    /// Empirical samples per file
    #[arg(long, default_value_t = 10_000)]
    samples: usize,

    /// Theoretical curve points per file
    #[arg(long, default_value_t = 1_000)]
    points: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// `weight`, `mu`, `sigma` of one normal component.
type Component = (f64, f64, f64);

fn normal_pdf(x: f64, mu: f64, sigma: f64) -> f64 {
    let z = (x - mu) / sigma;
    (-0.5 * z * z).exp() / (sigma * (2.0 * std::f64::consts::PI).sqrt())
}

fn mixture_pdf(x: f64, components: &[Component]) -> f64 {
    components
        .iter()
        .map(|&(w, mu, sigma)| w * normal_pdf(x, mu, sigma))
        .sum()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn mixture(&mut self, components: &[Component]) -> f64 {
        let mut u = self.next_f64();
        for &(w, mu, sigma) in components {
            if u < w {
                return self.gauss(mu, sigma);
            }
            u -= w;
        }
        let &(_, mu, sigma) = components.last().unwrap_or(&(1.0, 0.0, 1.0));
        self.gauss(mu, sigma)
    }

    fn pick<'a>(&mut self, values: &'a [f64]) -> Option<&'a f64> {
        if values.is_empty() {
            return None;
        }
        values.get((self.next_u64() % values.len() as u64) as usize)
    }
}

/// Curve spanning `mu ± 5 sigma` of every component.
fn density_curve(builder: &mut DatasetBuilder, components: &[Component], points: usize) {
    let lo = components
        .iter()
        .map(|&(_, mu, sigma)| mu - 5.0 * sigma)
        .fold(f64::INFINITY, f64::min);
    let hi = components
        .iter()
        .map(|&(_, mu, sigma)| mu + 5.0 * sigma)
        .fold(f64::NEG_INFINITY, f64::max);
    let step = if points > 1 {
        (hi - lo) / (points - 1) as f64
    } else {
        0.0
    };
    for i in 0..points {
        let x = lo + i as f64 * step;
        builder.push_point(x, mixture_pdf(x, components));
    }
}

fn comparison_case(
    title: &str,
    components: &[Component],
    args: &Args,
    rng: &mut SimpleRng,
) -> Dataset {
    let mut builder = DatasetBuilder::new(title);
    density_curve(&mut builder, components, args.points);
    for _ in 0..args.samples {
        builder.push_sample(rng.mixture(components));
    }
    builder.build()
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut rng = SimpleRng::new(args.seed);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let mut files: Vec<(PlotDataName, Dataset)> = Vec::new();

    let standalone: [(&str, Vec<Component>); 4] = [
        ("3.1.1", vec![(1.0, 0.0, 1.0)]),
        ("3.1.2", vec![(1.0, 0.0, 2.0)]),
        ("3.1.3", vec![(1.0, 5.0, 2.0)]),
        ("3.2.2", vec![(0.75, 0.0, 1.0), (0.25, 2.0, 1.0)]),
    ];
    for (test_case, components) in &standalone {
        let name = PlotDataName {
            test_case: test_case.to_string(),
            role: DatasetRole::Standalone,
        };
        files.push((name, comparison_case(test_case, components, args, &mut rng)));
    }

    // Composite case: density only, samples drawn from it, samples
    // bootstrapped from those samples.
    let standard = [(1.0, 0.0, 1.0)];
    let composite = "3.3.2";
    let named = |role| PlotDataName {
        test_case: composite.to_string(),
        role,
    };

    let mut main = DatasetBuilder::new(format!("{composite}_main"));
    density_curve(&mut main, &standard, args.points);
    files.push((named(DatasetRole::Main), main.build()));

    let mut drawn = Vec::with_capacity(args.samples);
    for _ in 0..args.samples {
        drawn.push(rng.gauss(0.0, 1.0));
    }
    let mut empirical_main = DatasetBuilder::new(format!("{composite}_empirical_main"));
    for &v in &drawn {
        empirical_main.push_sample(v);
    }
    files.push((named(DatasetRole::EmpiricalMain), empirical_main.build()));

    let mut bootstrap = DatasetBuilder::new(format!("{composite}_empirical_bootstrap"));
    for _ in 0..args.samples {
        if let Some(&v) = rng.pick(&drawn) {
            bootstrap.push_sample(v);
        }
    }
    files.push((named(DatasetRole::EmpiricalBootstrap), bootstrap.build()));

    for (name, dataset) in &files {
        let path = args.out_dir.join(name.file_name());
        write_file(&path, dataset).with_context(|| format!("writing {}", path.display()))?;
        println!(
            "Wrote {} ({} curve points, {} samples)",
            path.display(),
            dataset.theoretical_len(),
            dataset.empirical_samples().len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_the_same_stream() {
        let mut a = SimpleRng::new(7);
        let mut b = SimpleRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
        let u = a.next_f64();
        assert!((0.0..1.0).contains(&u));
    }

    #[test]
    fn pick_stays_inside_the_slice() {
        let mut rng = SimpleRng::new(1);
        let values = [1.0, 2.0, 3.0];
        for _ in 0..100 {
            assert!(values.contains(rng.pick(&values).unwrap()));
        }
        assert!(rng.pick(&[]).is_none());
    }

    #[test]
    fn density_curve_spans_five_sigma_with_the_requested_points() {
        let mut builder = DatasetBuilder::new("t");
        density_curve(&mut builder, &[(1.0, 0.0, 1.0)], 11);
        let ds = builder.build();

        assert_eq!(ds.theoretical_len(), 11);
        assert_eq!(ds.theoretical_x()[0], -5.0);
        assert_eq!(ds.theoretical_x()[10], 5.0);
        let peak = ds.theoretical_y()[5];
        assert!((peak - normal_pdf(0.0, 0.0, 1.0)).abs() < 1e-12);
    }

    #[test]
    fn run_writes_the_composite_triple() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            out_dir: dir.path().to_path_buf(),
            samples: 20,
            points: 5,
            seed: 3,
        };
        run(&args).unwrap();

        for suffix in ["main", "empirical_main", "empirical_bootstrap"] {
            assert!(dir.path().join(format!("plot_data_3.3.2_{suffix}.txt")).exists());
        }
        assert!(dir.path().join("plot_data_3.1.1.txt").exists());
    }
}
