use boxmerge::{
    DetectionSet, DetectionSummary, LabelPolicy, PostProcessConfig, PostProcessor,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Merge overlapping detections (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
    /// Print per-set score statistics to stderr.
    #[arg(long)]
    summary: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum LabelPolicyConfig {
    FirstSeen,
    HighestScore,
}

impl From<LabelPolicyConfig> for LabelPolicy {
    fn from(value: LabelPolicyConfig) -> Self {
        match value {
            LabelPolicyConfig::FirstSeen => LabelPolicy::FirstSeen,
            LabelPolicyConfig::HighestScore => LabelPolicy::HighestScore,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PostProcessConfigJson {
    confidence_threshold: f32,
    iou_threshold: f32,
    label_policy: LabelPolicyConfig,
    parallel: bool,
}

impl Default for PostProcessConfigJson {
    fn default() -> Self {
        let cfg = PostProcessConfig::default();
        Self {
            confidence_threshold: cfg.confidence_threshold,
            iou_threshold: cfg.iou_threshold,
            label_policy: LabelPolicyConfig::FirstSeen,
            parallel: cfg.parallel,
        }
    }
}

impl From<PostProcessConfigJson> for PostProcessConfig {
    fn from(value: PostProcessConfigJson) -> Self {
        PostProcessConfig {
            confidence_threshold: value.confidence_threshold,
            iou_threshold: value.iou_threshold,
            label_policy: value.label_policy.into(),
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    input_path: String,
    output_path: Option<String>,
    postprocess: PostProcessConfigJson,
}

/// Wire layout shared with the detection service: index-aligned columns.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
struct DetectionsJson {
    boxes: Vec<[f32; 4]>,
    scores: Vec<f32>,
    labels: Vec<u32>,
}

impl TryFrom<DetectionsJson> for DetectionSet {
    type Error = boxmerge::BoxMergeError;

    fn try_from(value: DetectionsJson) -> Result<Self, Self::Error> {
        DetectionSet::from_columns(&value.boxes, &value.scores, &value.labels)
    }
}

impl From<&DetectionSet> for DetectionsJson {
    fn from(value: &DetectionSet) -> Self {
        let (boxes, scores, labels) = value.to_columns();
        Self {
            boxes,
            scores,
            labels,
        }
    }
}

/// A single detection set or a batch of them; output mirrors the input shape.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
enum Payload {
    Batch(Vec<DetectionsJson>),
    Single(DetectionsJson),
}

#[derive(Debug, Serialize)]
struct SummaryRecord {
    index: usize,
    count: usize,
    mean_score: f32,
    max_score: f32,
    min_score: f32,
}

impl SummaryRecord {
    fn new(index: usize, summary: DetectionSummary) -> Self {
        Self {
            index,
            count: summary.count,
            mean_score: summary.mean_score,
            max_score: summary.max_score,
            min_score: summary.min_score,
        }
    }
}

fn process_payload(
    processor: &PostProcessor,
    payload: Payload,
) -> Result<(Payload, Vec<SummaryRecord>), boxmerge::BoxMergeError> {
    let (sets, single) = match payload {
        Payload::Single(dets) => (vec![DetectionSet::try_from(dets)?], true),
        Payload::Batch(batch) => (
            batch
                .into_iter()
                .map(DetectionSet::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            false,
        ),
    };

    let merged = processor.process_batch(sets);
    let summaries = merged
        .iter()
        .enumerate()
        .map(|(idx, set)| SummaryRecord::new(idx, set.summary()))
        .collect();
    let mut records: Vec<DetectionsJson> = merged.iter().map(DetectionsJson::from).collect();

    let out = match (single, records.pop()) {
        (true, Some(record)) => Payload::Single(record),
        (_, last) => {
            records.extend(last);
            Payload::Batch(records)
        }
    };
    Ok((out, summaries))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("boxmerge=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.input_path.is_empty() {
        return Err("input_path must be set in the config".into());
    }

    let processor = PostProcessor::new(config.postprocess.into())?;

    let input_text = fs::read_to_string(&config.input_path)?;
    let payload: Payload = serde_json::from_str(&input_text)?;
    let (output, summaries) = process_payload(&processor, payload)?;
    tracing::info!(sets = summaries.len(), "post-processing finished");

    if cli.summary {
        for record in &summaries {
            eprintln!("{}", serde_json::to_string(record)?);
        }
    }

    let json = serde_json::to_string_pretty(&output)?;
    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
