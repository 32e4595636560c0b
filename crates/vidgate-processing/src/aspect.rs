//! Aspect-ratio bucketing for storage placement.

use vidgate_core::models::Orientation;

const LANDSCAPE_RATIO: f64 = 16.0 / 9.0;
const PORTRAIT_RATIO: f64 = 9.0 / 16.0;

/// Map stream geometry to a placement bucket.
///
/// `width / height` is rounded to the nearest integer and compared against the
/// rounded canonical ratios: 16:9 rounds to 2 (landscape), 9:16 rounds to 1
/// (portrait). `f64::round` ties away from zero, so a ratio of exactly 1.5
/// lands in the landscape bucket. Square video (ratio 1.0) rounds to 1 and is
/// classified portrait.
///
/// This bucketing is deliberately coarse: it is a storage-placement hint, and
/// the key scheme in `vidgate-storage::keys` depends on exactly these three
/// buckets.
pub fn classify(width: u32, height: u32) -> Orientation {
    let rounded = (width as f64 / height as f64).round();

    if rounded == LANDSCAPE_RATIO.round() {
        Orientation::Landscape
    } else if rounded == PORTRAIT_RATIO.round() {
        Orientation::Portrait
    } else {
        Orientation::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_landscape() {
        // 1920/1080 = 1.78 -> rounds to 2
        assert_eq!(classify(1920, 1080), Orientation::Landscape);
        assert_eq!(classify(1280, 720), Orientation::Landscape);
    }

    #[test]
    fn test_canonical_portrait() {
        // 1080/1920 = 0.5625 -> rounds to 1
        assert_eq!(classify(1080, 1920), Orientation::Portrait);
        assert_eq!(classify(720, 1280), Orientation::Portrait);
    }

    #[test]
    fn test_ratio_tie_rounds_up() {
        // 1.5 rounds away from zero to 2 -> landscape
        assert_eq!(classify(1500, 1000), Orientation::Landscape);
    }

    #[test]
    fn test_square_is_portrait_bucket() {
        // Ratio 1.0 rounds to 1, colliding with the 9:16 bucket. Square video
        // is placed under portrait; changing this requires changing the key
        // scheme in lockstep.
        assert_eq!(classify(1000, 1000), Orientation::Portrait);
    }

    #[test]
    fn test_ultrawide_is_other() {
        // 4000/1000 = 4.0
        assert_eq!(classify(4000, 1000), Orientation::Other);
        // 2.35:1 cinema rounds to 2 -> still landscape by this rule
        assert_eq!(classify(2350, 1000), Orientation::Landscape);
    }

    #[test]
    fn test_tall_sliver_is_other() {
        // 100/1000 = 0.1 -> rounds to 0
        assert_eq!(classify(100, 1000), Orientation::Other);
    }
}
