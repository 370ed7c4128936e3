use crate::error::Error;

/// Derive the output-series suffix for each requested percentile.
///
/// `0.99` becomes `.p99`, `0.999` becomes `.p999` and so on: the fractional
/// part of the shortest decimal rendering, prefixed with `.p`. Every
/// percentile must lie strictly inside (0, 1) and the batch is rejected as a
/// whole on the first violation, so callers never see partial results.
///
/// Distinct percentiles that render to the same label (there are none in
/// decimal) are the caller's problem, not checked here.
pub(crate) fn percentile_labels(percentiles: &[f64]) -> Result<Vec<String>, Error> {
    if percentiles.is_empty() {
        return Err(Error::InvalidConfiguration(
            "at least one percentile is required".to_owned(),
        ));
    }
    percentiles
        .iter()
        .map(|&p| {
            if p <= 0.0 || p >= 1.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "percentile {p} must lie in the open interval (0, 1)"
                )));
            }
            // f64 Display is the shortest round-trip decimal form and never
            // uses exponent notation, so for 0 < p < 1 it always starts "0.".
            let rendered = p.to_string();
            Ok(format!(".p{}", &rendered[2..]))
        })
        .collect()
}
