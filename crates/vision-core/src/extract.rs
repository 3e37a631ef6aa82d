//! Candidate extraction: binary mask → sorted candidate list.

use image::GrayImage;
use imageproc::region_labelling::{connected_components, Connectivity};

use huelock_common::config::DetectionConfig;
use huelock_track_model::{Candidate, PixelPos};

/// Per-region spatial moments accumulated over the labelled mask.
#[derive(Debug, Clone, Copy, Default)]
struct RegionMoments {
    /// Zeroth moment: pixel count.
    m00: u64,
    /// First moments.
    m10: u64,
    m01: u64,
}

/// Extract candidates from a binary mask.
///
/// Labels maximal 8-connected foreground regions, computes each region's
/// pixel-count area and area-weighted centroid, and filters out regions
/// that are too small, degenerate, or whose centroid falls outside the
/// capture bounds. The result is sorted by area descending; ties preserve
/// discovery (label) order.
pub fn extract_candidates(mask: &GrayImage, detection: &DetectionConfig) -> Vec<Candidate> {
    let labelled = connected_components(mask, Connectivity::Eight, image::Luma([0u8]));

    let mut moments: Vec<RegionMoments> = Vec::new();
    for (x, y, label) in labelled.enumerate_pixels() {
        let label = label[0] as usize;
        if label == 0 {
            continue; // background
        }
        if label > moments.len() {
            moments.resize(label, RegionMoments::default());
        }
        let m = &mut moments[label - 1];
        m.m00 += 1;
        m.m10 += x as u64;
        m.m01 += y as u64;
    }

    let mut candidates: Vec<Candidate> = moments
        .iter()
        .filter_map(|m| {
            // Degenerate regions must be skipped, never divided by.
            if m.m00 == 0 {
                return None;
            }
            let area = m.m00 as f64;
            if area <= detection.min_target_size {
                return None;
            }
            let pos = PixelPos::new(
                (m.m10 as f64 / area) as i32,
                (m.m01 as f64 / area) as i32,
            );
            if !pos.in_bounds(detection.capture_size) {
                return None;
            }
            Some(Candidate::new(pos, area))
        })
        .collect();

    // Stable: equal areas keep discovery order.
    candidates.sort_by(|a, b| b.area.total_cmp(&a.area));

    tracing::trace!(count = candidates.len(), "Candidates extracted");
    candidates
}
