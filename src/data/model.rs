// ---------------------------------------------------------------------------
// Dataset – one parsed plot dump
// ---------------------------------------------------------------------------

/// A parsed plot dump: a sampled theoretical density plus the raw empirical
/// observations it is compared against.
///
/// Built only through [`DatasetBuilder`] (the parser uses it too) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    title: String,
    declared_points_count: i64,
    declared_empirical_size: i64,
    /// Density abscissae – same length as `theoretical_y`.
    theoretical_x: Vec<f64>,
    /// Density values.
    theoretical_y: Vec<f64>,
    empirical_samples: Vec<f64>,
}

impl Dataset {
    /// Test-case identifier taken from the first header line.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of curve points the header claims. Advisory only.
    pub fn declared_points_count(&self) -> i64 {
        self.declared_points_count
    }

    /// Number of empirical samples the header claims. Advisory only.
    pub fn declared_empirical_size(&self) -> i64 {
        self.declared_empirical_size
    }

    pub fn theoretical_x(&self) -> &[f64] {
        &self.theoretical_x
    }

    pub fn theoretical_y(&self) -> &[f64] {
        &self.theoretical_y
    }

    /// Curve points as `(x, y)` pairs in file order.
    pub fn theoretical_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.theoretical_x
            .iter()
            .copied()
            .zip(self.theoretical_y.iter().copied())
    }

    /// Number of parsed curve points.
    pub fn theoretical_len(&self) -> usize {
        self.theoretical_x.len()
    }

    pub fn empirical_samples(&self) -> &[f64] {
        &self.empirical_samples
    }
}

// ---------------------------------------------------------------------------
// DatasetBuilder – append-only construction
// ---------------------------------------------------------------------------

/// Accumulates curve points and samples, then freezes them into a [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    title: String,
    declared: Option<(i64, i64)>,
    theoretical_x: Vec<f64>,
    theoretical_y: Vec<f64>,
    empirical_samples: Vec<f64>,
}

impl DatasetBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the header counts. Without this, `build` declares the actual lengths.
    /// Any integer is accepted, negative ones included.
    pub fn declared_counts(mut self, points_count: i64, empirical_size: i64) -> Self {
        self.declared = Some((points_count, empirical_size));
        self
    }

    /// Append one theoretical curve point.
    pub fn push_point(&mut self, x: f64, y: f64) {
        self.theoretical_x.push(x);
        self.theoretical_y.push(y);
    }

    /// Append one empirical observation.
    pub fn push_sample(&mut self, value: f64) {
        self.empirical_samples.push(value);
    }

    pub fn points_len(&self) -> usize {
        self.theoretical_x.len()
    }

    pub fn samples_len(&self) -> usize {
        self.empirical_samples.len()
    }

    pub fn build(self) -> Dataset {
        let (declared_points_count, declared_empirical_size) = self
            .declared
            .unwrap_or((
                self.theoretical_x.len() as i64,
                self.empirical_samples.len() as i64,
            ));
        Dataset {
            title: self.title,
            declared_points_count,
            declared_empirical_size,
            theoretical_x: self.theoretical_x,
            theoretical_y: self.theoretical_y,
            empirical_samples: self.empirical_samples,
        }
    }
}
