//! Least-squares linear detrending.

/// Removes the least-squares straight line from `data`.
///
/// Series shorter than two samples are returned unchanged.
pub fn detrend_linear(data: &[f64]) -> Vec<f64> {
    let n = data.len();
    if n < 2 {
        return data.to_vec();
    }
    let nf = n as f64;
    let t_mean = (nf - 1.0) / 2.0;
    let y_mean = data.iter().sum::<f64>() / nf;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, &y) in data.iter().enumerate() {
        let dt = i as f64 - t_mean;
        sxy += dt * (y - y_mean);
        sxx += dt * dt;
    }
    let slope = sxy / sxx;
    data.iter()
        .enumerate()
        .map(|(i, &y)| y - y_mean - slope * (i as f64 - t_mean))
        .collect()
}
