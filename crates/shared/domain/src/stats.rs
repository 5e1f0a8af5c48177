/// Summary statistics over a set of density values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityStats {
    pub count: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl DensityStats {
    /// Collects count/average/min/max from an iterator of densities.
    ///
    /// Returns `None` for an empty input so callers never see fabricated
    /// zero or NaN entries.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_densities(densities: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for density in densities {
            count += 1;
            sum += density;
            min = min.min(density);
            max = max.max(density);
        }

        (count > 0).then(|| Self { count, average: sum / count as f64, min, max })
    }
}
