//! Nebula CLI: generate random graphs and inspect their degree distribution
//!
//! Builds a Barabási-Albert or Watts-Strogatz graph, prints its degree
//! statistics and writes a Graphviz DOT rendering to disk.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use nebula::{
    barabasi_albert, watts_strogatz, write_dot, BarabasiAlbertConfig, DegreeDistribution,
    DotConfig, Graph, GraphStatistics, WattsStrogatzConfig,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nebula", version, about = "Nebula random graph generator")]
struct Cli {
    /// YAML file with generator and rendering settings
    #[arg(long, global = true, env = "NEBULA_CONFIG")]
    config: Option<PathBuf>,

    /// Output format for the degree statistics
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, PartialEq, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Barabási-Albert preferential attachment graph
    Ba {
        /// Total number of nodes
        #[arg(long)]
        nodes: Option<usize>,

        /// Size of the seed ring (m0)
        #[arg(long)]
        initial_nodes: Option<usize>,

        /// Edges attached from every new node (m)
        #[arg(long)]
        edges_per_node: Option<usize>,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// DOT file to write
        #[arg(long, short, default_value = "ba.dot")]
        output: PathBuf,
    },
    /// Watts-Strogatz small-world graph
    Ws {
        /// Number of nodes on the ring
        #[arg(long)]
        nodes: Option<usize>,

        /// Lattice degree k (even)
        #[arg(long)]
        mean_degree: Option<usize>,

        /// Fraction of lattice edges to rewire
        #[arg(long)]
        rewire_probability: Option<f64>,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// DOT file to write
        #[arg(long, short, default_value = "ws.dot")]
        output: PathBuf,
    },
}

/// Settings loaded from `--config`; flags override individual fields
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    barabasi_albert: BarabasiAlbertConfig,
    watts_strogatz: WattsStrogatzConfig,
    dot: DotConfig,
}

#[derive(Serialize)]
struct DegreeReport {
    statistics: GraphStatistics,
    average_degree: Option<f64>,
    max_degree: Option<usize>,
    distribution: DegreeDistribution,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;

    let (graph, output) = match cli.command {
        Commands::Ba {
            nodes,
            initial_nodes,
            edges_per_node,
            seed,
            output,
        } => {
            let ba = &mut config.barabasi_albert;
            override_with(&mut ba.nodes, nodes);
            override_with(&mut ba.initial_nodes, initial_nodes);
            override_with(&mut ba.edges_per_node, edges_per_node);
            if seed.is_some() {
                ba.seed = seed;
            }
            (barabasi_albert(ba)?, output)
        }
        Commands::Ws {
            nodes,
            mean_degree,
            rewire_probability,
            seed,
            output,
        } => {
            let ws = &mut config.watts_strogatz;
            override_with(&mut ws.nodes, nodes);
            override_with(&mut ws.mean_degree, mean_degree);
            override_with(&mut ws.rewire_probability, rewire_probability);
            if seed.is_some() {
                ws.seed = seed;
            }
            (watts_strogatz(ws)?, output)
        }
    };

    print_report(&degree_report(&graph), &cli.format)?;
    write_graph(&graph, &config.dot, &output)
}

fn override_with<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn load_config(path: Option<&Path>) -> Result<FileConfig> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn degree_report(graph: &Graph) -> DegreeReport {
    let mut distribution = graph.get_indegree_distribution();
    distribution.sort();
    DegreeReport {
        statistics: graph.statistics(),
        average_degree: distribution.average_degree(),
        max_degree: distribution.max_degree(),
        distribution,
    }
}

fn print_report(report: &DegreeReport, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Csv => {
            print!("{}", format_csv(&report.distribution));
        }
        OutputFormat::Table => {
            println!("Nodes: {}", report.statistics.node_count);
            println!("Edges: {}", report.statistics.edge_count);
            match report.average_degree {
                Some(avg) => println!("kAvg:  {:.4}", avg),
                None => println!("kAvg:  n/a"),
            }
            match report.max_degree {
                Some(max) => println!("kMax:  {}", max),
                None => println!("kMax:  n/a"),
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["k", "nodes"]);
            for (degree, count) in report.distribution.iter() {
                table.add_row(vec![degree.to_string(), count.to_string()]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

fn format_csv(distribution: &DegreeDistribution) -> String {
    let mut out = String::from("degree,count\n");
    for (degree, count) in distribution.iter() {
        out.push_str(&format!("{},{}\n", degree, count));
    }
    out
}

fn write_graph(graph: &Graph, config: &DotConfig, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_dot(graph, config, BufWriter::new(file))
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote DOT rendering to {}", path.display());
    Ok(())
}
