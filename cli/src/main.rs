//! afgraph CLI: load a pangenome graph, inspect its k-mer index and match sequences

use afgraph::{
    AlignmentFreeGraph, ColorConsistency, ConnectionSettings, GraphConfig, GraphStore, KmerIndex, MatchPath,
};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "afgraph", version, about = "Alignment-free matching over colored nucleotide graphs")]
struct Cli {
    /// JSON config file (connection settings, k, color_consistency)
    #[arg(long, global = true, env = "AFGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// K-mer length (overrides the config file)
    #[arg(short, long, global = true, env = "AFGRAPH_K")]
    k: Option<usize>,

    /// Color check applied by index matches
    #[arg(long, global = true, value_enum)]
    consistency: Option<Consistency>,

    /// Store URI
    #[arg(long, global = true, env = "AFGRAPH_URI")]
    uri: Option<String>,

    /// Store database name
    #[arg(long, global = true, env = "AFGRAPH_DB")]
    db_name: Option<String>,

    /// Store user
    #[arg(long, global = true, env = "AFGRAPH_USER")]
    user: Option<String>,

    /// Store password
    #[arg(long, global = true, env = "AFGRAPH_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Never draw import progress bars
    #[arg(long, global = true)]
    no_progress: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Consistency {
    Disjoint,
    Shared,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Strategy {
    Index,
    Traversal,
    Both,
}

/// Graph input; exactly one is required
#[derive(Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// GFA file (S and P records)
    #[arg(long)]
    gfa: Option<PathBuf>,

    /// JSON bulk file ({"nodes": [...], "relations": [...]})
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a graph and print its k-mer index
    Index {
        #[command(flatten)]
        source: Source,
    },
    /// Match a sequence against a graph
    Match {
        /// Query sequence (case and whitespace are ignored)
        sequence: String,

        #[command(flatten)]
        source: Source,

        /// Lookup strategy
        #[arg(long, default_value = "index")]
        strategy: Strategy,
    },
    /// Load a graph and report its size and acyclicity
    Check {
        #[command(flatten)]
        source: Source,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let progress = !cli.no_progress && std::io::stderr().is_terminal();

    match &cli.command {
        Commands::Index { source } => {
            let graph = open_graph(&config, source, progress)?;
            print_index(graph.index(), cli.format)
        }
        Commands::Match { sequence, source, strategy } => {
            let mut graph = open_graph(&config, source, progress)?;
            let mut results = Vec::new();
            if matches!(strategy, Strategy::Index | Strategy::Both) {
                results.push(("index", graph.match_via_index(sequence, None)?));
            }
            if matches!(strategy, Strategy::Traversal | Strategy::Both) {
                results.push(("traversal", graph.match_via_traversal(sequence, None)?));
            }
            print_matches(&results, cli.format)
        }
        Commands::Check { source } => {
            let graph = open_graph(&config, source, progress)?;
            print_check(&graph, cli.format)
        }
    }
}

fn load_config(cli: &Cli) -> Result<GraphConfig> {
    let mut config = match &cli.config {
        Some(path) => GraphConfig::from_file(path)?,
        None => GraphConfig::default(),
    };
    config = config.with_overrides(ConnectionSettings {
        uri: cli.uri.clone(),
        db_name: cli.db_name.clone(),
        user: cli.user.clone(),
        password: cli.password.clone(),
    });
    if let Some(k) = cli.k {
        config.k = k;
    }
    if let Some(consistency) = cli.consistency {
        config.color_consistency = match consistency {
            Consistency::Disjoint => ColorConsistency::Disjoint,
            Consistency::Shared => ColorConsistency::Shared,
        };
    }
    Ok(config)
}

fn open_graph(config: &GraphConfig, source: &Source, progress: bool) -> Result<AlignmentFreeGraph<GraphStore>> {
    let mut graph = AlignmentFreeGraph::connect(config)?;
    if let Some(path) = &source.gfa {
        let summary = graph
            .import_gfa_file(path, progress)
            .with_context(|| format!("importing {}", path.display()))?;
        info!("Loaded {} nodes and {} edges from {}", summary.nodes, summary.edges, path.display());
    } else if let Some(path) = &source.json {
        let summary = graph
            .bulk_import_file(path)
            .with_context(|| format!("importing {}", path.display()))?;
        info!("Loaded {} nodes and {} edges from {}", summary.nodes, summary.edges, path.display());
    }
    Ok(graph)
}

fn print_index(index: &KmerIndex, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&index.to_json_rows()?)?),
        OutputFormat::Csv => print!("{}", index.to_csv()),
        OutputFormat::Table => {
            if index.is_empty() {
                println!("(empty index, k={})", index.k());
                return Ok(());
            }
            let mut table = new_table(&["start", "kmer", "colors"]);
            for row in index.rows() {
                let colors: Vec<&str> = row.colors.iter().map(|c| c.as_str()).collect();
                table.add_row(vec![row.start.as_u64().to_string(), row.kmer, colors.join(", ")]);
            }
            println!("{}", table);
            println!("{} k-mer(s), k={}, {} ambiguous dropped", index.len(), index.k(), index.purged());
        }
    }
    Ok(())
}

fn print_matches(results: &[(&str, MatchPath)], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = results
                .iter()
                .map(|(strategy, path)| -> Result<(String, serde_json::Value)> {
                    Ok((strategy.to_string(), serde_json::to_value(path)?))
                })
                .collect::<Result<_>>()?;
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        OutputFormat::Csv => {
            println!("strategy,position,node");
            for (strategy, path) in results {
                for (position, node) in path.iter() {
                    println!("{},{},{}", strategy, position, node.as_u64());
                }
            }
        }
        OutputFormat::Table => {
            for (strategy, path) in results {
                if path.is_empty() {
                    println!("{}: (no match)", strategy);
                    continue;
                }
                let mut table = new_table(&["position", "node"]);
                for (position, node) in path.iter() {
                    table.add_row(vec![position.to_string(), node.as_u64().to_string()]);
                }
                println!("{}:", strategy);
                println!("{}", table);
            }
        }
    }
    Ok(())
}

fn print_check(graph: &AlignmentFreeGraph<GraphStore>, format: OutputFormat) -> Result<()> {
    let store = graph.backend();
    let index = graph.index();
    let acyclic = graph.is_acyclic()?;
    let report = serde_json::json!({
        "nodes": store.node_count(),
        "edges": store.edge_count(),
        "colors": store.colors().len(),
        "acyclic": acyclic,
        "k": index.k(),
        "kmers": index.len(),
        "ambiguous": index.purged(),
    });

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Csv => {
            println!("nodes,edges,colors,acyclic,k,kmers,ambiguous");
            println!(
                "{},{},{},{},{},{},{}",
                store.node_count(),
                store.edge_count(),
                store.colors().len(),
                acyclic,
                index.k(),
                index.len(),
                index.purged()
            );
        }
        OutputFormat::Table => {
            println!("Nodes:    {}", store.node_count());
            println!("Edges:    {}", store.edge_count());
            println!("Colors:   {}", store.colors().len());
            println!("Acyclic:  {}", acyclic);
            println!("K:        {}", index.k());
            println!("K-mers:   {} ({} ambiguous dropped)", index.len(), index.purged());
        }
    }
    Ok(())
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.to_vec());
    table
}
