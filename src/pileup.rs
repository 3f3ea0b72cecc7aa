use std::error;

use log::info;
use strum::IntoEnumIterator;
use thousands::Separable;

use crate::cli;
use crate::cna_segment::get_total_segment_count;
use crate::pileup_layout::{CnaColorClass, layout_pileup};
use crate::pileup_plot::write_pileup_plot;
use crate::reference_genome::GenomeCoordinateMap;
use crate::segment_reader::read_flat_bed_cells;

pub fn run_pileup(settings: &cli::PileupSettings) -> Result<(), Box<dyn error::Error>> {
    let cells = read_flat_bed_cells(&settings.bed_filename)?;
    info!(
        "Found {} segments to plot",
        get_total_segment_count(&cells).separate_with_commas()
    );

    let coords = GenomeCoordinateMap::hg38();
    let layout = layout_pileup(&coords, &cells, settings.cell_ploidy);

    for color_class in CnaColorClass::iter() {
        let label: &'static str = color_class.into();
        info!(
            "Placed {} {label} segments",
            layout.color_class_counts[color_class as usize].separate_with_commas()
        );
    }
    info!(
        "Skipped {} segments at the cell ploidy of {}",
        layout.neutral_segment_count.separate_with_commas(),
        settings.cell_ploidy
    );
    if layout.unknown_chrom_segment_count > 0 {
        info!(
            "Skipped {} segments on chromosomes missing from the reference genome table",
            layout.unknown_chrom_segment_count.separate_with_commas()
        );
    }
    if layout.out_of_range_segment_count > 0 {
        info!(
            "Skipped {} segments extending outside of their chromosome",
            layout.out_of_range_segment_count.separate_with_commas()
        );
    }

    write_pileup_plot(&settings.get_output_filename(), &coords, &layout)?;

    Ok(())
}
