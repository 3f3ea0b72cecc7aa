//! Greedy placement of copy number alteration segments onto stacked pileup bands
//!

use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use strum::{EnumCount, EnumIter, IntoStaticStr};

use crate::cna_segment::{CellCnaSegments, CnaSegment};
use crate::int_range::IntRange;
use crate::reference_genome::GenomeCoordinateMap;

/// Distance from the genome axis to the first band on either side
pub const FIRST_BAND_OFFSET: i64 = 1_000_000;

/// Distance between successive band positions moving away from the axis
pub const BAND_STEP: i64 = 500_000;

pub const BAND_HEIGHT: i64 = 200_000;

/// Copy number alteration magnitude relative to the expected cell ploidy
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumCount, EnumIter, IntoStaticStr)]
pub enum CnaColorClass {
    DeepLoss,
    Loss,
    LightLoss,
    LightGain,
    Gain,
    DeepGain,
}

impl CnaColorClass {
    /// Classify a copy number relative to the cell ploidy
    ///
    /// Returns None when the copy number equals the ploidy.
    ///
    pub fn from_copy_number(copy_number: i32, ploidy: i32) -> Option<Self> {
        use CnaColorClass::*;
        use std::cmp::Ordering::*;
        let delta = copy_number - ploidy;
        match delta.cmp(&0) {
            Equal => None,
            Greater => Some(match delta {
                1 => LightGain,
                2 => Gain,
                _ => DeepGain,
            }),
            Less => Some(match delta {
                -1 => LightLoss,
                -2 => Loss,
                _ => DeepLoss,
            }),
        }
    }

    pub fn is_gain(&self) -> bool {
        matches!(
            self,
            CnaColorClass::LightGain | CnaColorClass::Gain | CnaColorClass::DeepGain
        )
    }
}

/// A segment rectangle placed on the linear genome plot
///
/// Both ranges are treated as closed intervals for collision checks.
///
#[derive(Clone, Debug)]
pub struct PlacedRectangle {
    pub x: IntRange,
    pub y: IntRange,
    pub color_class: CnaColorClass,
}

impl PlacedRectangle {
    pub fn overlaps(&self, other: &PlacedRectangle) -> bool {
        self.x.intersect_closed_range(&other.x) && self.y.intersect_closed_range(&other.y)
    }
}

/// Place a rectangle for the x range in the band closest to the axis which does not collide with
/// any rectangle already placed on the chromosome
///
/// Each candidate band is checked against every placed rectangle, so a chromosome with n
/// rectangles takes O(n^2) time to lay out.
///
fn place_in_open_band(
    x: IntRange,
    color_class: CnaColorClass,
    chrom_rectangles: &[PlacedRectangle],
) -> PlacedRectangle {
    let (mut y_offset, step) = if color_class.is_gain() {
        (FIRST_BAND_OFFSET, BAND_STEP)
    } else {
        (-FIRST_BAND_OFFSET, -BAND_STEP)
    };
    loop {
        let candidate = PlacedRectangle {
            x: x.clone(),
            y: IntRange::from_pair(y_offset, y_offset + BAND_HEIGHT),
            color_class,
        };
        if !chrom_rectangles.iter().any(|r| r.overlaps(&candidate)) {
            return candidate;
        }
        y_offset += step;
    }
}

#[derive(Default)]
pub struct PileupLayout {
    /// Rectangles in placement order
    pub rectangles: Vec<PlacedRectangle>,

    chrom_rectangles: HashMap<String, Vec<PlacedRectangle>>,

    unknown_chroms: HashSet<String>,

    pub color_class_counts: [usize; CnaColorClass::COUNT],

    /// Segments not drawn because their copy number matches the cell ploidy
    pub neutral_segment_count: usize,

    /// Segments not drawn because their chromosome is missing from the reference table
    pub unknown_chrom_segment_count: usize,

    /// Segments not drawn because they extend outside of their chromosome
    pub out_of_range_segment_count: usize,
}

impl PileupLayout {
    /// Place one segment above the axis for a gain or below it for a loss
    ///
    /// The segment is placed in the band nearest the axis that does not collide with any segment
    /// previously placed on the same chromosome. Placement is greedy, so earlier segments claim
    /// the nearer bands.
    ///
    pub fn place_segment(
        &mut self,
        coords: &GenomeCoordinateMap,
        segment: &CnaSegment,
        ploidy: i32,
    ) {
        let color_class = match CnaColorClass::from_copy_number(segment.copy_number, ploidy) {
            Some(x) => x,
            None => {
                self.neutral_segment_count += 1;
                return;
            }
        };

        let chrom = match coords.get_chrom(&segment.chrom) {
            Some(x) => x,
            None => {
                if self.unknown_chroms.insert(segment.chrom.clone()) {
                    warn!(
                        "Chromosome '{}' is not in the reference genome table, skipping all segments on this chromosome",
                        segment.chrom
                    );
                }
                self.unknown_chrom_segment_count += 1;
                return;
            }
        };

        if segment.range.start < 0 || segment.range.end > chrom.info.length {
            warn!(
                "Segment {}:{:?} extends outside of the chromosome length {}, skipping segment",
                segment.chrom, segment.range, chrom.info.length
            );
            self.out_of_range_segment_count += 1;
            return;
        }

        let x = IntRange::from_pair(
            chrom.offset + segment.range.start,
            chrom.offset + segment.range.end,
        );
        let chrom_rectangles = self
            .chrom_rectangles
            .entry(segment.chrom.clone())
            .or_default();
        let rectangle = place_in_open_band(x, color_class, chrom_rectangles);

        debug!(
            "Placed {:?} segment {}:{:?} at band {:?}",
            color_class, segment.chrom, segment.range, rectangle.y
        );

        chrom_rectangles.push(rectangle.clone());
        self.color_class_counts[color_class as usize] += 1;
        self.rectangles.push(rectangle);
    }

    /// Largest distance of any placed rectangle edge from the genome axis
    pub fn max_band_extent(&self) -> i64 {
        self.rectangles
            .iter()
            .map(|r| std::cmp::max(r.y.start.abs(), r.y.end.abs()))
            .max()
            .unwrap_or(0)
    }
}

/// Lay out all segments from all cells in input order
///
pub fn layout_pileup(
    coords: &GenomeCoordinateMap,
    cells: &[CellCnaSegments],
    ploidy: i32,
) -> PileupLayout {
    let mut layout = PileupLayout::default();
    for cell in cells.iter() {
        for segment in cell.segments.iter() {
            layout.place_segment(coords, segment, ploidy);
        }
    }
    layout
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::reference_genome::CHROMOSOME_GAP;

    fn get_test_cells(segments: &[(&str, i64, i64, i32)]) -> Vec<CellCnaSegments> {
        let mut cell = CellCnaSegments::new("cellA");
        for &(chrom, start, end, copy_number) in segments {
            cell.segments
                .push(CnaSegment::new(chrom, start, end, copy_number));
        }
        vec![cell]
    }

    #[test]
    fn test_color_class() {
        use CnaColorClass::*;
        let ploidy = 2;
        assert_eq!(CnaColorClass::from_copy_number(0, ploidy), Some(Loss));
        assert_eq!(CnaColorClass::from_copy_number(1, ploidy), Some(LightLoss));
        assert_eq!(CnaColorClass::from_copy_number(2, ploidy), None);
        assert_eq!(CnaColorClass::from_copy_number(3, ploidy), Some(LightGain));
        assert_eq!(CnaColorClass::from_copy_number(4, ploidy), Some(Gain));
        assert_eq!(CnaColorClass::from_copy_number(5, ploidy), Some(DeepGain));
        assert_eq!(CnaColorClass::from_copy_number(9, ploidy), Some(DeepGain));

        let ploidy = 4;
        assert_eq!(CnaColorClass::from_copy_number(1, ploidy), Some(DeepLoss));
        assert_eq!(CnaColorClass::from_copy_number(2, ploidy), Some(Loss));
        assert_eq!(CnaColorClass::from_copy_number(4, ploidy), None);
    }

    #[test]
    fn test_is_gain() {
        let gains = CnaColorClass::iter()
            .filter(|x| x.is_gain())
            .collect::<Vec<_>>();
        assert_eq!(
            gains,
            vec![
                CnaColorClass::LightGain,
                CnaColorClass::Gain,
                CnaColorClass::DeepGain
            ]
        );
    }

    #[test]
    fn test_rectangle_overlap() {
        let r1 = PlacedRectangle {
            x: IntRange::from_pair(0, 100),
            y: IntRange::from_pair(0, 10),
            color_class: CnaColorClass::Gain,
        };
        let mut r2 = PlacedRectangle {
            x: IntRange::from_pair(100, 200),
            y: IntRange::from_pair(10, 20),
            color_class: CnaColorClass::Gain,
        };

        // Touching corners count as overlap
        assert!(r1.overlaps(&r2));
        assert!(r2.overlaps(&r1));

        r2.y = IntRange::from_pair(11, 20);
        assert!(!r1.overlaps(&r2));

        r2.x = IntRange::from_pair(101, 200);
        r2.y = IntRange::from_pair(0, 10);
        assert!(!r1.overlaps(&r2));
    }

    #[test]
    fn test_first_band_position() {
        let coords = GenomeCoordinateMap::hg38();
        let cells = get_test_cells(&[("chr2", 1000, 5000, 3), ("chr2", 10_000, 50_000, 1)]);
        let layout = layout_pileup(&coords, &cells, 2);
        assert_eq!(layout.rectangles.len(), 2);

        let chr2_offset = 248956422 + CHROMOSOME_GAP;
        let gain = &layout.rectangles[0];
        assert_eq!(
            gain.x,
            IntRange::from_pair(chr2_offset + 1000, chr2_offset + 5000)
        );
        assert_eq!(gain.y, IntRange::from_pair(1_000_000, 1_200_000));

        let loss = &layout.rectangles[1];
        assert_eq!(loss.y, IntRange::from_pair(-1_000_000, -800_000));
    }

    #[test]
    fn test_overlapping_gains_stack() {
        let coords = GenomeCoordinateMap::hg38();
        let cells = get_test_cells(&[
            ("chr1", 1000, 5000, 3),
            ("chr1", 4000, 8000, 4),
            ("chr1", 2000, 3000, 6),
        ]);
        let layout = layout_pileup(&coords, &cells, 2);
        let y_starts = layout
            .rectangles
            .iter()
            .map(|r| r.y.start)
            .collect::<Vec<_>>();
        assert_eq!(y_starts, vec![1_000_000, 1_500_000, 1_500_000]);

        for (i, r1) in layout.rectangles.iter().enumerate() {
            for r2 in layout.rectangles.iter().skip(i + 1) {
                assert!(!r1.overlaps(r2));
            }
        }
    }

    #[test]
    fn test_overlapping_losses_stack() {
        let coords = GenomeCoordinateMap::hg38();
        let cells = get_test_cells(&[("chr1", 1000, 5000, 1), ("chr1", 3000, 9000, 0)]);
        let layout = layout_pileup(&coords, &cells, 2);
        assert_eq!(layout.rectangles[0].y.start, -1_000_000);
        assert_eq!(layout.rectangles[1].y.start, -1_500_000);
        assert!(layout.rectangles[1].y.end < layout.rectangles[0].y.start);
    }

    #[test]
    fn test_adjacent_segments_stack() {
        // Segments sharing an endpoint collide under the closed interval convention
        let coords = GenomeCoordinateMap::hg38();
        let cells = get_test_cells(&[("chr1", 1000, 5000, 3), ("chr1", 5000, 9000, 3)]);
        let layout = layout_pileup(&coords, &cells, 2);
        assert_eq!(layout.rectangles[1].y.start, 1_500_000);
    }

    #[test]
    fn test_gain_and_loss_share_no_band() {
        let coords = GenomeCoordinateMap::hg38();
        let cells = get_test_cells(&[("chr1", 1000, 5000, 3), ("chr1", 1000, 5000, 1)]);
        let layout = layout_pileup(&coords, &cells, 2);
        assert_eq!(layout.rectangles[0].y.start, 1_000_000);
        assert_eq!(layout.rectangles[1].y.start, -1_000_000);
    }

    #[test]
    fn test_chromosomes_stack_independently() {
        let coords = GenomeCoordinateMap::hg38();
        let cells = get_test_cells(&[("chr1", 1000, 5000, 3), ("chr2", 1000, 5000, 3)]);
        let layout = layout_pileup(&coords, &cells, 2);
        assert_eq!(layout.rectangles[0].y.start, 1_000_000);
        assert_eq!(layout.rectangles[1].y.start, 1_000_000);
    }

    #[test]
    fn test_neutral_and_unknown_segments_skipped() {
        let coords = GenomeCoordinateMap::hg38();
        let cells = get_test_cells(&[
            ("chr1", 1000, 5000, 2),
            ("chrY", 1000, 5000, 3),
            ("chrY", 8000, 9000, 1),
            ("chr1", 1000, 5000, 3),
        ]);
        let layout = layout_pileup(&coords, &cells, 2);
        assert_eq!(layout.neutral_segment_count, 1);
        assert_eq!(layout.unknown_chrom_segment_count, 2);
        assert_eq!(layout.rectangles.len(), 1);

        // The neutral segment doesn't claim a band
        assert_eq!(layout.rectangles[0].y.start, 1_000_000);
        assert_eq!(
            layout.color_class_counts[CnaColorClass::LightGain as usize],
            1
        );
    }

    #[test]
    fn test_out_of_range_segments_skipped() {
        let coords = GenomeCoordinateMap::hg38();
        let chr2_length = 242193529;
        let cells = get_test_cells(&[
            ("chr2", 9223372036854775000, 9223372036854775806, 3),
            ("chr2", chr2_length - 1000, chr2_length + 1, 3),
            ("chr2", -1000, 5000, 1),
            ("chr2", chr2_length - 1000, chr2_length, 3),
        ]);
        let layout = layout_pileup(&coords, &cells, 2);
        assert_eq!(layout.out_of_range_segment_count, 3);
        assert_eq!(layout.rectangles.len(), 1);

        // A segment ending exactly at the chromosome end is drawn
        let chr2_offset = 248956422 + CHROMOSOME_GAP;
        assert_eq!(layout.rectangles[0].x.end, chr2_offset + chr2_length);
    }

    #[test]
    fn test_max_band_extent() {
        let coords = GenomeCoordinateMap::hg38();
        let layout = layout_pileup(&coords, &[], 2);
        assert_eq!(layout.max_band_extent(), 0);

        let cells = get_test_cells(&[("chr1", 1000, 5000, 1), ("chr1", 1000, 5000, 1)]);
        let layout = layout_pileup(&coords, &cells, 2);
        assert_eq!(layout.max_band_extent(), 1_500_000);
    }
}
