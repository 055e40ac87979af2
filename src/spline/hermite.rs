use glam::Vec3;

/// Piecewise-cubic Hermite curve over `t` in [0, 1].
///
/// Control pairs are (position, tangent); the parameter maps uniformly
/// across the n-1 segments and tangents are stored unnormalized, scaled by
/// 1/(n-1) at evaluation to account for the compressed per-segment domain.
/// This approximates arc-uniform speed, it does not guarantee it; see
/// [`ArcLengthTable`] for a closer approximation.
#[derive(Debug, Clone, Default)]
pub struct HermiteSpline {
    points: Vec<Vec3>,
    tangents: Vec<Vec3>,
}

impl HermiteSpline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, position: Vec3, tangent: Vec3) {
        self.points.push(position);
        self.tangents.push(tangent);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Position at `t` in [0, 1]. Out-of-range parameters clamp to the
    /// endpoints; fewer than two control points yields the zero vector.
    pub fn position(&self, t: f32) -> Vec3 {
        if self.points.len() < 2 {
            return Vec3::ZERO;
        }

        let t = t.clamp(0.0, 1.0);
        let segments = self.points.len() - 1;
        let scaled = t * segments as f32;
        // t = 1.0 lands on the last segment with local s = 1.0
        let seg = (scaled as usize).min(segments - 1);
        let s = scaled - seg as f32;

        let p0 = self.points[seg];
        let p1 = self.points[seg + 1];
        let scale = 1.0 / segments as f32;
        let m0 = self.tangents[seg] * scale;
        let m1 = self.tangents[seg + 1] * scale;

        let s2 = s * s;
        let s3 = s2 * s;
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        p0 * h00 + m0 * h10 + p1 * h01 + m1 * h11
    }

    /// Uniform polyline sampling, `samples + 1` points from t = 0 to 1.
    /// Handy for handing the curve to an external line renderer.
    pub fn sample(&self, samples: usize) -> Vec<Vec3> {
        let samples = samples.max(1);
        (0..=samples)
            .map(|i| self.position(i as f32 / samples as f32))
            .collect()
    }
}

/// Cumulative chord-length table over a spline.
///
/// Maps an arc-length fraction back to a curve parameter so callers can
/// trade the uniform parametrization for approximately constant speed.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    params: Vec<f32>,
    cumulative: Vec<f32>,
    total: f32,
}

impl ArcLengthTable {
    pub fn new(spline: &HermiteSpline, samples: usize) -> Self {
        let samples = samples.max(1);
        let mut params = Vec::with_capacity(samples + 1);
        let mut cumulative = Vec::with_capacity(samples + 1);

        let mut total = 0.0;
        let mut previous = spline.position(0.0);
        params.push(0.0);
        cumulative.push(0.0);

        for i in 1..=samples {
            let t = i as f32 / samples as f32;
            let p = spline.position(t);
            total += previous.distance(p);
            params.push(t);
            cumulative.push(total);
            previous = p;
        }

        Self {
            params,
            cumulative,
            total,
        }
    }

    pub fn total_length(&self) -> f32 {
        self.total
    }

    /// Curve parameter at the given arc-length `fraction` in [0, 1],
    /// linearly interpolated between table entries.
    pub fn t_at(&self, fraction: f32) -> f32 {
        if self.total <= 0.0 {
            return 0.0;
        }
        let target = fraction.clamp(0.0, 1.0) * self.total;

        let idx = match self
            .cumulative
            .binary_search_by(|len| len.partial_cmp(&target).unwrap_or(std::cmp::Ordering::Less))
        {
            Ok(i) => return self.params[i],
            Err(i) => i,
        };
        if idx == 0 {
            return self.params[0];
        }
        if idx >= self.cumulative.len() {
            return *self.params.last().unwrap_or(&1.0);
        }

        let lo = self.cumulative[idx - 1];
        let hi = self.cumulative[idx];
        let span = hi - lo;
        let blend = if span > 0.0 { (target - lo) / span } else { 0.0 };
        self.params[idx - 1] + blend * (self.params[idx] - self.params[idx - 1])
    }
}
