//! Hemocytometer (Neubauer chamber) cell counting.
//!
//! Counts come from a fixed number of chamber quadrants of known volume in
//! mm³. The sample may have been diluted before loading, so the result is
//! scaled back by the dilution factor to cells per mL of the original sample.

use log::debug;

use crate::chemistry::MM3_PER_ML;
use crate::error::NeubauerError;
use crate::models::{NeubauerRequest, NeubauerResult};

/// Cell concentration (cells/mL) from a Neubauer chamber count.
///
/// The average count per quadrant is divided by the counted volume
/// (`num_quadrants × quadrant_volume`, mm³), scaled from mm³ to mL and
/// multiplied by the dilution factor.
///
/// Checks run in this order and stop at the first failure: quadrant number,
/// quadrant volume and dilution factor must be positive, there must be one
/// count per quadrant, and no count may be negative. Arithmetic failures
/// (overflowing totals, non-finite results) are reported as
/// [`NeubauerError::Calculation`].
pub fn calculate_concentration(req: &NeubauerRequest) -> Result<NeubauerResult, NeubauerError> {
    if req.num_quadrants <= 0 {
        return Err(NeubauerError::NonPositiveQuadrants);
    }
    if req.quadrant_volume <= 0.0 {
        return Err(NeubauerError::NonPositiveQuadrantVolume);
    }
    if req.dilution_factor <= 0.0 {
        return Err(NeubauerError::NonPositiveDilutionFactor);
    }
    let quadrants_match = usize::try_from(req.num_quadrants)
        .map(|n| n == req.cell_counts.len())
        .unwrap_or(false);
    if !quadrants_match {
        return Err(NeubauerError::CountMismatch {
            counts: req.cell_counts.len(),
            quadrants: req.num_quadrants,
        });
    }
    if let Some(i) = req.cell_counts.iter().position(|&c| c < 0) {
        return Err(NeubauerError::NegativeCount { quadrant: i + 1 });
    }

    let total_cells = req
        .cell_counts
        .iter()
        .try_fold(0i64, |acc, &c| acc.checked_add(c))
        .ok_or_else(|| NeubauerError::Calculation("total cell count overflowed".into()))?;

    let n = req.num_quadrants as f64;
    let average_cells = total_cells as f64 / n;
    let counted_volume = n * req.quadrant_volume;
    let per_mm3 = average_cells / counted_volume;
    let concentration = per_mm3 * MM3_PER_ML * req.dilution_factor;

    if !concentration.is_finite() {
        return Err(NeubauerError::Calculation(format!(
            "concentration is not a finite number ({concentration})"
        )));
    }

    debug!(
        "neubauer: {total_cells} cells in {} quadrants -> {concentration} cells/mL",
        req.num_quadrants
    );

    Ok(NeubauerResult {
        concentration,
        total_cells,
        average_cells,
        num_quadrants: req.num_quadrants,
        volume_per_quadrant: req.quadrant_volume,
        dilution_factor: req.dilution_factor,
    })
}
