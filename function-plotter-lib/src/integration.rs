use anyhow::{bail, Result};
use log::debug;

/// Approximates the area under `function` between two bounds with a right Riemann sum.
///
/// The bounds may be given in either order. The interval is split into
/// `divisions` rectangles of equal width, each as tall as the function at its
/// right edge.
///
/// # Arguments
///
/// * `divisions`: The number of rectangles, at least one.
/// * `lower_limit`: One end of the interval.
/// * `upper_limit`: The other end of the interval.
/// * `function`: The function to integrate.
///
/// returns: The approximated area, negative where the function is.
///
/// # Examples
///
/// ```
/// use function_plotter::integration::area;
/// use function_plotter::interpreter::function::Function;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let function = Function::new("2", Default::default());
/// let area = area(4, 0.0, 3.0, |x| function.evaluate(x))?;
/// assert_eq!(area, 6.0);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn area(
    divisions: u32,
    mut lower_limit: f64,
    mut upper_limit: f64,
    function: impl Fn(f64) -> f64,
) -> Result<f64> {
    if divisions == 0 {
        bail!("The number of divisions must be at least 1");
    }
    if upper_limit < lower_limit {
        std::mem::swap(&mut lower_limit, &mut upper_limit);
    }

    let step = (upper_limit - lower_limit) / f64::from(divisions);
    let sum: f64 = (1..=divisions)
        .map(|i| function(lower_limit + f64::from(i) * step))
        .sum();

    debug!(
        "summed {} rectangles of width {} over [{}, {}]",
        divisions, step, lower_limit, upper_limit
    );
    Ok(sum * step)
}
