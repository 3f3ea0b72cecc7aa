//! Static hg38 chromosome table and the linear genome coordinate layout used for plotting
//!

use std::collections::HashMap;

/// Gap inserted between consecutive chromosomes on the linear genome axis
pub const CHROMOSOME_GAP: i64 = 10_000_000;

pub struct ChromosomeInfo {
    pub label: &'static str,
    pub length: i64,
    pub centromere_start: i64,
    pub centromere_end: i64,
}

const fn chrom(
    label: &'static str,
    length: i64,
    centromere_start: i64,
    centromere_end: i64,
) -> ChromosomeInfo {
    ChromosomeInfo {
        label,
        length,
        centromere_start,
        centromere_end,
    }
}

/// hg38 autosomes and chrX, in plot order
pub static HG38_CHROMOSOMES: [ChromosomeInfo; 23] = [
    chrom("chr1", 248956422, 121700000, 125100000),
    chrom("chr2", 242193529, 91800000, 96000000),
    chrom("chr3", 198295559, 87800000, 94000000),
    chrom("chr4", 190214555, 48200000, 51800000),
    chrom("chr5", 181538259, 46100000, 51400000),
    chrom("chr6", 170805979, 58500000, 62600000),
    chrom("chr7", 159345973, 58100000, 62100000),
    chrom("chr8", 145138636, 43200000, 47200000),
    chrom("chr9", 138394717, 42200000, 45500000),
    chrom("chr10", 133797422, 38000000, 41600000),
    chrom("chr11", 135086622, 51000000, 55800000),
    chrom("chr12", 133275309, 33200000, 37800000),
    chrom("chr13", 114364328, 16500000, 18900000),
    chrom("chr14", 107043718, 16100000, 18200000),
    chrom("chr15", 101991189, 17500000, 20500000),
    chrom("chr16", 90338345, 35300000, 38400000),
    chrom("chr17", 83257441, 22700000, 27400000),
    chrom("chr18", 80373285, 15400000, 21500000),
    chrom("chr19", 58617616, 24200000, 28100000),
    chrom("chr20", 64444167, 25700000, 30400000),
    chrom("chr21", 46709983, 10900000, 13000000),
    chrom("chr22", 50818468, 13700000, 17400000),
    chrom("chrX", 156040895, 58100000, 63800000),
];

impl ChromosomeInfo {
    /// Chromosome label used on the plot, without any 'chr' prefix
    pub fn short_label(&self) -> &str {
        self.label.strip_prefix("chr").unwrap_or(self.label)
    }
}

pub struct PlacedChromosome {
    pub info: &'static ChromosomeInfo,

    /// Start of the chromosome on the linear genome axis
    pub offset: i64,
}

impl PlacedChromosome {
    pub fn end(&self) -> i64 {
        self.offset + self.info.length
    }
}

/// Maps each chromosome onto a single linear axis
///
/// Chromosomes are concatenated in table order, separated by `CHROMOSOME_GAP`.
///
pub struct GenomeCoordinateMap {
    pub chroms: Vec<PlacedChromosome>,
    label_to_index: HashMap<&'static str, usize>,
}

impl GenomeCoordinateMap {
    pub fn from_chromosomes(chrom_table: &'static [ChromosomeInfo]) -> Self {
        let mut chroms = Vec::new();
        let mut label_to_index = HashMap::new();
        let mut offset = 0;
        for (chrom_index, info) in chrom_table.iter().enumerate() {
            chroms.push(PlacedChromosome { info, offset });
            label_to_index.insert(info.label, chrom_index);
            offset += info.length + CHROMOSOME_GAP;
        }
        Self {
            chroms,
            label_to_index,
        }
    }

    pub fn hg38() -> Self {
        Self::from_chromosomes(&HG38_CHROMOSOMES)
    }

    /// Return None for a chromosome missing from the reference table
    pub fn get_chrom(&self, label: &str) -> Option<&PlacedChromosome> {
        self.label_to_index
            .get(label)
            .map(|&chrom_index| &self.chroms[chrom_index])
    }

    /// End of the last chromosome on the linear axis
    pub fn genome_end(&self) -> i64 {
        self.chroms.last().map(|x| x.end()).unwrap_or(0)
    }
}
