use anyhow::Result;
use arnoux_yoccoz::api::{FoliationRp2, SearchError, Side};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod output;
mod provenance;
mod source;

use output::{concise_depths, segment_records, write_json, CurveRecord, CurveReportRecord, FoliationRecord};
use provenance::{write_sidecar, Payload};
use source::SourceArgs;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Search Arnoux–Yoccoz style pseudo-Anosov maps on RP²")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print lengths, pairing, and singularity type of the foliation
    Show {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the odd depths below --depth of good shifted separatrix segments
    ///
    /// The --out JSON keeps every good depth.
    Segments {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, default_value_t = 50)]
        depth: usize,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List good one-sided curves, longest connecting arc first
    Curves {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, default_value_t = 50)]
        depth: usize,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Cut along every good curve and report the self-similar foliations found
    Search {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, default_value_t = 50)]
        depth: usize,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Show { source, out } => show(&source, out),
        Action::Segments { source, depth, out } => segments(&source, depth, out),
        Action::Curves { source, depth, out } => curves(&source, depth, out),
        Action::Search { source, depth, out } => search(&source, depth, out),
        Action::Report => report(),
    }
}

fn load(source: &SourceArgs) -> Result<FoliationRp2> {
    let foliation = source.build().inspect_err(|e| {
        tracing::warn!(error = %format!("{e:#}"), "rejected_input");
    })?;
    tracing::info!(
        separatrices = foliation.num_separatrices(),
        signature = ?foliation.disk().prong_signature(),
        "foliation"
    );
    Ok(foliation)
}

fn save<T: serde::Serialize>(
    out: Option<PathBuf>,
    value: &T,
    command: &'static str,
    source: &SourceArgs,
    depth: Option<usize>,
) -> Result<()> {
    let Some(path) = out else {
        return Ok(());
    };
    write_json(&path, value)?;
    let payload = Payload::new(command, json!({ "source": source.params(), "depth": depth }));
    let sidecar = write_sidecar(&path, &payload)?;
    tracing::info!(out = %path.display(), provenance = %sidecar.display(), "wrote");
    Ok(())
}

fn show(source: &SourceArgs, out: Option<PathBuf>) -> Result<()> {
    let foliation = load(source)?;
    println!("{foliation}");
    let record = FoliationRecord::from(foliation.disk());
    save(out, &record, "show", source, None)
}

fn segments(source: &SourceArgs, depth: usize, out: Option<PathBuf>) -> Result<()> {
    let mut foliation = load(source)?;
    foliation.generate_good_segments(depth);
    for sep in foliation.saddle_connections() {
        tracing::warn!(
            separatrix = sep,
            depth = foliation.current_depth(sep),
            "saddle_connection"
        );
    }
    for sep in 0..foliation.num_separatrices() {
        for side in Side::SHIFTED {
            let depths: Vec<String> = concise_depths(&foliation, sep, side, depth)
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("separatrix {sep} {side:?}: {}", depths.join(" "));
        }
    }
    save(out, &segment_records(&foliation), "segments", source, Some(depth))
}

fn curves(source: &SourceArgs, depth: usize, out: Option<PathBuf>) -> Result<()> {
    let mut foliation = load(source)?;
    let found = foliation.generate_good_curves(depth);
    tracing::info!(depth, curves = found.len(), "good_curves");
    for curve in found {
        println!("{curve}");
    }
    let records: Vec<CurveRecord> = found.iter().map(Into::into).collect();
    save(out, &records, "curves", source, Some(depth))
}

fn search(source: &SourceArgs, depth: usize, out: Option<PathBuf>) -> Result<()> {
    let mut foliation = load(source)?;
    let reports = foliation.search_pseudo_anosovs(depth);
    for report in &reports {
        match &report.outcome {
            Ok(found) => {
                tracing::info!(curve = %report.curve, found = found.len(), "curve_searched");
                for pa in found {
                    println!("{pa}\n");
                }
            }
            Err(e @ SearchError::SaddleConnection { .. }) => {
                tracing::warn!(curve = %report.curve, error = %e, "search_incomplete");
            }
            Err(e) => {
                tracing::info!(curve = %report.curve, error = %e, "no_pseudo_anosov");
            }
        }
    }
    let records: Vec<CurveReportRecord> = reports.iter().map(Into::into).collect();
    save(out, &records, "search", source, Some(depth))
}

fn report() -> Result<()> {
    let doc = provenance::block(&Payload::new("report", json!({})), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
