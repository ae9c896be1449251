use crate::types::config::{AccuracyBand, StyleBand};

/// Finds the style band whose closed `[low, high]` range holds `percent`.
///
/// Values outside every band resolve to the nearest one: the lowest band below
/// the partition, the highest above it. Returns `None` only for an empty list.
pub fn classify_style(bands: &[StyleBand], percent: i64) -> Option<&StyleBand> {
    if let Some(band) = u8::try_from(percent)
        .ok()
        .and_then(|percent| bands.iter().find(|band| band.contains(percent)))
    {
        return Some(band);
    }

    let first = bands.first()?;
    let last = bands.last()?;
    if percent < i64::from(first.low) {
        return Some(first);
    }
    if percent > i64::from(last.high) {
        return Some(last);
    }

    // Only reachable with an unvalidated partition that has gaps.
    bands.iter().min_by_key(|band| {
        let low = i64::from(band.low);
        let high = i64::from(band.high);
        (percent - high).max(low - percent)
    })
}

/// Finds the accuracy band with the greatest cut point not above `percent`.
pub fn classify_accuracy(bands: &[AccuracyBand], percent: i64) -> Option<&AccuracyBand> {
    bands
        .iter()
        .rev()
        .find(|band| percent >= i64::from(band.min))
        .or_else(|| bands.first())
}
