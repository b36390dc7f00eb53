//! Genome-assembly (GFA) import
//!
//! Only segment (`S`) and path (`P`) records are consumed. Each segment is
//! exploded into a chain of one-base nodes, and each path becomes a run of
//! edges colored with the path name.

use crate::backend::GraphBackend;
use crate::engine::AlignmentFreeGraph;
use crate::error::AfgResult;
use crate::graph::{Color, Label, NodeId, NodeSelector, Orientation, PropertyMap, MAX_NODE_ID, NAME_KEY};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Label given to imported nodes
pub const BASE_LABEL: &str = "Base";

/// Attribute recording the segment a node was exploded from
pub const SEGMENT_KEY: &str = "segment";

/// Characters removed from a path name to form its color
const COLOR_SEPARATORS: [char; 3] = ['|', ':', '-'];

#[derive(Error, Debug)]
pub enum GfaError {
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("line {line}: invalid orientation '{marker}' (expected '+' or '-')")]
    Orientation { line: usize, marker: String },

    #[error("line {line}: duplicate segment {segment}")]
    DuplicateSegment { line: usize, segment: u64 },

    #[error("segment {segment}: no node ids left for its bases")]
    IdsExhausted { segment: u64 },

    #[error("path '{path}' references unknown segment {segment}")]
    UnknownSegment { path: String, segment: u64 },

    #[error("failed to read GFA input: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub id: u64,
    pub sequence: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GfaPath {
    pub name: String,
    pub steps: Vec<(u64, Strand)>,
}

impl GfaPath {
    /// Path name without separator characters
    pub fn color(&self) -> Color {
        Color::new(
            self.name
                .chars()
                .filter(|c| !COLOR_SEPARATORS.contains(c))
                .collect::<String>(),
        )
    }
}

/// Segments and paths of a GFA file, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GfaDocument {
    pub segments: Vec<Segment>,
    pub paths: Vec<GfaPath>,
}

/// Counts reported after a GFA import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GfaImportSummary {
    pub segments: usize,
    pub nodes: usize,
    pub paths: usize,
    pub edges: usize,
}

impl GfaDocument {
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, GfaError> {
        let mut doc = GfaDocument::default();
        let mut seen = HashSet::new();

        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = line?;
            let line = line.trim_end_matches('\r');
            let fields: Vec<&str> = line.split('\t').collect();

            match fields[0] {
                "S" => {
                    let segment = parse_segment(&fields, line_no)?;
                    if !seen.insert(segment.id) {
                        return Err(GfaError::DuplicateSegment { line: line_no, segment: segment.id });
                    }
                    doc.segments.push(segment);
                }
                "P" => doc.paths.push(parse_path(&fields, line_no)?),
                other => debug!("Skipping GFA line {} ({:?})", line_no, other),
            }
        }
        Ok(doc)
    }

    pub fn parse_str(text: &str) -> Result<Self, GfaError> {
        Self::parse(text.as_bytes())
    }

    /// One-base node chains per segment id.
    ///
    /// The first base keeps the segment id; later bases get fresh ids above
    /// both the segment count and the largest segment id.
    pub fn explode(&self) -> Result<BTreeMap<u64, Vec<(NodeId, char)>>, GfaError> {
        // Segment ids are at most MAX_NODE_ID, so this cannot overflow
        let largest = self.segments.iter().map(|s| s.id).max().unwrap_or(0);
        let mut next_id = largest.max(self.segments.len() as u64) + 1;

        let mut chains = BTreeMap::new();
        for segment in &self.segments {
            let mut chain = Vec::with_capacity(segment.sequence.len());
            for (i, base) in segment.sequence.chars().enumerate() {
                let id = if i == 0 {
                    segment.id
                } else {
                    if next_id > MAX_NODE_ID {
                        return Err(GfaError::IdsExhausted { segment: segment.id });
                    }
                    next_id += 1;
                    next_id - 1
                };
                chain.push((NodeId::new(id), base));
            }
            chains.insert(segment.id, chain);
        }
        Ok(chains)
    }

    /// Per-base node trail of a path
    pub fn trail(&self, path: &GfaPath, chains: &BTreeMap<u64, Vec<(NodeId, char)>>) -> Result<Vec<NodeId>, GfaError> {
        let mut trail = Vec::new();
        for (segment, strand) in &path.steps {
            let chain = chains.get(segment).ok_or_else(|| GfaError::UnknownSegment {
                path: path.name.clone(),
                segment: *segment,
            })?;
            match strand {
                Strand::Forward => trail.extend(chain.iter().map(|(id, _)| *id)),
                Strand::Reverse => trail.extend(chain.iter().rev().map(|(id, _)| *id)),
            }
        }
        Ok(trail)
    }
}

fn parse_segment(fields: &[&str], line: usize) -> Result<Segment, GfaError> {
    if fields.len() < 3 {
        return Err(GfaError::Malformed { line, reason: "segment needs an id and a sequence".into() });
    }
    let id = parse_segment_id(fields[1], line)?;
    let sequence = fields[2].trim().to_uppercase();
    if sequence.is_empty() || sequence == "*" {
        return Err(GfaError::Malformed { line, reason: format!("segment {} has no sequence", id) });
    }
    Ok(Segment { id, sequence })
}

fn parse_path(fields: &[&str], line: usize) -> Result<GfaPath, GfaError> {
    if fields.len() < 3 {
        return Err(GfaError::Malformed { line, reason: "path needs a name and segment list".into() });
    }
    let name = fields[1].to_string();
    let steps = fields[2]
        .split(',')
        .filter(|step| !step.is_empty())
        .map(|step| -> Result<(u64, Strand), GfaError> {
            let split = step.len() - step.chars().last().map_or(0, char::len_utf8);
            let (id, marker) = step.split_at(split);
            let strand = match marker {
                "+" => Strand::Forward,
                "-" => Strand::Reverse,
                _ => return Err(GfaError::Orientation { line, marker: marker.to_string() }),
            };
            Ok((parse_segment_id(id, line)?, strand))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(GfaPath { name, steps })
}

fn parse_segment_id(field: &str, line: usize) -> Result<u64, GfaError> {
    field
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0 && *id <= MAX_NODE_ID)
        .ok_or_else(|| GfaError::Malformed { line, reason: format!("invalid segment id '{}'", field) })
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::default_bar()
        .template("{msg} [{bar:40}] {pos}/{len}")
        .map(|s| s.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(len).with_style(style)
}

impl<B: GraphBackend> AlignmentFreeGraph<B> {
    /// Import a parsed GFA document and rebuild the index once.
    ///
    /// Unknown segment references fail before anything is written. A failed
    /// node write, or an edge rejected by the acyclicity check, aborts the
    /// import after the index has been rebuilt over what was written.
    pub fn import_gfa(&mut self, document: &GfaDocument, progress: bool) -> AfgResult<GfaImportSummary> {
        let chains = document.explode()?;
        let trails = document
            .paths
            .iter()
            .map(|path| -> Result<_, GfaError> { Ok((path.color(), document.trail(path, &chains)?)) })
            .collect::<Result<Vec<_>, GfaError>>()?;

        let edges: Vec<_> = trails
            .iter()
            .flat_map(|(color, trail)| {
                trail.windows(2).map(move |pair| {
                    (NodeSelector::by_id(pair[0]), NodeSelector::by_id(pair[1]), color.clone(), Orientation::Forward)
                })
            })
            .collect();
        let bar = progress_bar(edges.len() as u64, progress);

        let mut summary = GfaImportSummary {
            segments: document.segments.len(),
            paths: trails.len(),
            ..Default::default()
        };
        let result = self.write_then_rebuild(|graph| {
            for (segment, chain) in &chains {
                for (id, base) in chain {
                    let mut attributes = PropertyMap::new();
                    attributes.insert(NAME_KEY.to_string(), (*base).into());
                    attributes.insert(SEGMENT_KEY.to_string(), (*segment).into());
                    graph.backend.create_node(Some(*id), Label::new(BASE_LABEL), attributes)?;
                    summary.nodes += 1;
                }
            }
            graph.insert_edges(edges.into_iter().inspect(|(_, _, color, _)| {
                bar.set_message(color.to_string());
                bar.inc(1);
            }))
        });
        bar.finish_and_clear();
        summary.edges = result?;

        info!(
            "GFA import: {} segments, {} nodes, {} paths, {} edges",
            summary.segments, summary.nodes, summary.paths, summary.edges
        );
        Ok(summary)
    }

    pub fn import_gfa_file(&mut self, path: impl AsRef<Path>, progress: bool) -> AfgResult<GfaImportSummary> {
        let file = File::open(path).map_err(GfaError::from)?;
        let document = GfaDocument::parse(BufReader::new(file))?;
        self.import_gfa(&document, progress)
    }
}
