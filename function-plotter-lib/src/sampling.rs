/// A point on the graph of a function.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Evenly spaced x values centred on zero, used to draw the graph of a function.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SampleGrid {
    pub points: usize,
    pub interval: f64,
}

impl Default for SampleGrid {
    fn default() -> Self {
        SampleGrid {
            points: 9000,
            interval: 0.1,
        }
    }
}

impl SampleGrid {
    /// The first x value of the grid.
    pub fn start(&self) -> f64 {
        -(self.points as f64 * self.interval) / 2.0
    }

    pub fn x_values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.points).map(move |i| self.start() + i as f64 * self.interval)
    }

    /// Evaluates the function at every x value of the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use function_plotter::sampling::SampleGrid;
    ///
    /// let grid = SampleGrid { points: 4, interval: 0.5 };
    /// let points = grid.sample(|x| 2.0 * x);
    /// assert_eq!(points[0].x, -1.0);
    /// assert_eq!(points[3].y, 1.0);
    /// ```
    pub fn sample(&self, function: impl Fn(f64) -> f64) -> Vec<Point> {
        self.x_values()
            .map(|x| Point { x, y: function(x) })
            .collect()
    }
}
