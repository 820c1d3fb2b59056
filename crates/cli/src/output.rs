//! JSON records written by `--out`.

use anyhow::{Context, Result};
use arnoux_yoccoz::api::{
    CurveReport, FoliationDisk, FoliationRp2, GoodOneSidedCurve, PseudoAnosov, Side,
};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct FoliationRecord {
    pub lengths: Vec<f64>,
    pub pairing: Vec<usize>,
    pub singularity_type: Vec<usize>,
}

impl From<&FoliationDisk> for FoliationRecord {
    fn from(disk: &FoliationDisk) -> Self {
        Self {
            lengths: disk.lengths().to_vec(),
            pairing: disk.pairing().to_vec(),
            singularity_type: disk.prong_signature(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SegmentsRecord {
    pub separatrix: usize,
    pub left_depths: Vec<usize>,
    pub right_depths: Vec<usize>,
    pub saddle_connection: bool,
}

pub fn segment_records(foliation: &FoliationRp2) -> Vec<SegmentsRecord> {
    let depths = |sep: usize, side: Side| -> Vec<usize> {
        foliation
            .good_segments(sep, side)
            .iter()
            .map(|s| s.depth())
            .collect()
    };
    (0..foliation.num_separatrices())
        .map(|sep| SegmentsRecord {
            separatrix: sep,
            left_depths: depths(sep, Side::Left),
            right_depths: depths(sep, Side::Right),
            saddle_connection: foliation.has_saddle_connection(sep),
        })
        .collect()
}

/// Odd depths strictly below `depth`: the depths a one-sided curve can start from.
pub fn concise_depths(
    foliation: &FoliationRp2,
    sep: usize,
    side: Side,
    depth: usize,
) -> Vec<usize> {
    foliation
        .good_segments(sep, side)
        .iter()
        .map(|s| s.depth())
        .take_while(|&d| d < depth)
        .filter(|d| d % 2 == 1)
        .collect()
}

#[derive(Debug, Serialize)]
pub struct CurveRecord {
    /// (separatrix, depth) of the left-shifted segment.
    pub left: (usize, usize),
    pub right: (usize, usize),
    pub arc: (f64, f64),
    pub double_length: f64,
}

impl From<&GoodOneSidedCurve> for CurveRecord {
    fn from(curve: &GoodOneSidedCurve) -> Self {
        let arc = curve.connecting_arc();
        Self {
            left: (curve.left().separatrix(), curve.left().depth()),
            right: (curve.right().separatrix(), curve.right().depth()),
            arc: (arc.left().value(), arc.right().value()),
            double_length: 2.0 * arc.length(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PseudoAnosovRecord {
    pub foliation: FoliationRecord,
    pub reflection: bool,
    pub rotation: usize,
    pub eigenvalue: f64,
    pub stretch_factor: f64,
    pub matrix: Vec<Vec<i64>>,
}

impl From<&PseudoAnosov> for PseudoAnosovRecord {
    fn from(pa: &PseudoAnosov) -> Self {
        Self {
            foliation: pa.foliation().into(),
            reflection: pa.symmetry().reflection,
            rotation: pa.symmetry().rotation,
            eigenvalue: pa.eigenvalue(),
            stretch_factor: pa.stretch_factor(),
            matrix: pa.matrix().rows().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CurveReportRecord {
    pub curve: CurveRecord,
    pub pseudo_anosovs: Vec<PseudoAnosovRecord>,
    /// Why the search along this curve stopped early, if it did.
    pub error: Option<String>,
}

impl From<&CurveReport> for CurveReportRecord {
    fn from(report: &CurveReport) -> Self {
        let (pseudo_anosovs, error) = match &report.outcome {
            Ok(found) => (found.iter().map(Into::into).collect(), None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        };
        Self {
            curve: (&report.curve).into(),
            pseudo_anosovs,
            error,
        }
    }
}

/// Pretty JSON at `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}
