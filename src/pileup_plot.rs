use std::error;

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use plotters::prelude::*;

use crate::pileup_layout::{BAND_STEP, CnaColorClass, PileupLayout};
use crate::reference_genome::GenomeCoordinateMap;

/// Padding on either end of the linear genome axis
const GENOME_MARGIN: i64 = 10_000_000;

/// Minimum plot height above and below the genome axis
const MIN_Y_EXTENT: i64 = 15_000_000;

const BACKBONE_HALF_HEIGHT: i64 = 500_000;

const PLOT_SIZE: (u32, u32) = (2400, 800);

const SILVER: RGBColor = RGBColor(192, 192, 192);
const DARK_ORANGE: RGBColor = RGBColor(255, 140, 0);

fn get_color_class_color(color_class: CnaColorClass) -> RGBColor {
    use CnaColorClass::*;
    match color_class {
        DeepGain => RGBColor(139, 0, 0),
        Gain => RGBColor(255, 0, 0),
        LightGain => RGBColor(240, 128, 128),
        LightLoss => RGBColor(176, 196, 222),
        Loss => RGBColor(0, 0, 255),
        DeepLoss => RGBColor(0, 0, 139),
    }
}

pub fn get_pileup_plot_filename(output_prefix: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{output_prefix}_pileup_graph.svg"))
}

/// Render the pileup layout as an SVG figure
///
/// Each chromosome is drawn as a grey backbone band on the genome axis with its centromere
/// highlighted, and is labeled at its start. Placed segments are drawn on top with partial
/// transparency. No plot axes are drawn.
///
pub fn write_pileup_plot(
    filename: &Utf8Path,
    coords: &GenomeCoordinateMap,
    layout: &PileupLayout,
) -> Result<(), Box<dyn error::Error>> {
    info!("Writing pileup plot to file: '{filename}'");

    let root = SVGBackend::new(filename, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let y_extent = std::cmp::max(MIN_Y_EXTENT, layout.max_band_extent() + BAND_STEP);
    let mut chart = ChartBuilder::on(&root).margin(10).build_cartesian_2d(
        -GENOME_MARGIN..(coords.genome_end() + GENOME_MARGIN),
        -y_extent..y_extent,
    )?;

    let label_style = ("sans-serif", 10.0).into_font().color(&BLACK);

    for chrom in coords.chroms.iter() {
        let backbone = Rectangle::new(
            [
                (chrom.offset, -BACKBONE_HALF_HEIGHT),
                (chrom.end(), BACKBONE_HALF_HEIGHT),
            ],
            SILVER.filled(),
        );
        let centromere = Rectangle::new(
            [
                (
                    chrom.offset + chrom.info.centromere_start,
                    -BACKBONE_HALF_HEIGHT,
                ),
                (
                    chrom.offset + chrom.info.centromere_end,
                    BACKBONE_HALF_HEIGHT,
                ),
            ],
            DARK_ORANGE.filled(),
        );
        chart.draw_series([backbone, centromere])?;
        chart.draw_series(std::iter::once(Text::new(
            chrom.info.short_label().to_string(),
            (chrom.offset, -BACKBONE_HALF_HEIGHT),
            label_style.clone(),
        )))?;
    }

    chart.draw_series(layout.rectangles.iter().map(|r| {
        Rectangle::new(
            [(r.x.start, r.y.start), (r.x.end, r.y.end)],
            get_color_class_color(r.color_class).mix(0.5).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cna_segment::{CellCnaSegments, CnaSegment};
    use crate::pileup_layout::layout_pileup;

    #[test]
    fn test_get_pileup_plot_filename() {
        assert_eq!(
            get_pileup_plot_filename("out/run1").as_str(),
            "out/run1_pileup_graph.svg"
        );
    }

    #[test]
    fn test_write_pileup_plot() {
        let coords = GenomeCoordinateMap::hg38();
        let mut cell = CellCnaSegments::new("cellA");
        cell.segments
            .push(CnaSegment::new("chr1", 1_000_000, 5_000_000, 3));
        cell.segments
            .push(CnaSegment::new("chr7", 1_000_000, 5_000_000, 0));
        let layout = layout_pileup(&coords, &[cell], 2);

        let dir = tempfile::tempdir().unwrap();
        let filename = Utf8PathBuf::from_path_buf(dir.path().join("x_pileup_graph.svg")).unwrap();
        write_pileup_plot(&filename, &coords, &layout).unwrap();

        let content = std::fs::read_to_string(&filename).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("<rect"));
    }
}
