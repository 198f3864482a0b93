//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::tree::TraverseOrder;

/// Algorithm step-trace engine: replayable step ledgers for BST and graph algorithms
#[derive(Parser, Debug)]
#[command(name = "steptrace")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Emit the ledger as JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a BST operation and print its step trace
    Tree {
        /// Values inserted into the tree before the operation runs
        #[arg(long, value_delimiter = ',')]
        values: Vec<i64>,

        #[command(subcommand)]
        command: TreeCommands,
    },

    /// Run a graph algorithm and print its step trace
    Graph {
        /// Node display values, in insertion order (first = source)
        #[arg(long = "node")]
        nodes: Vec<String>,

        /// Edges as SOURCE:TARGET[:WEIGHT], weight defaults to 1
        #[arg(long = "edge")]
        edges: Vec<String>,

        /// Treat edges as undirected (mirror edges are materialized)
        #[arg(long)]
        undirected: bool,

        #[command(subcommand)]
        command: GraphCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum TreeCommands {
    /// Insert a value
    Insert { value: i64 },

    /// Search for a value
    Search { value: i64 },

    /// Delete a value
    Delete { value: i64 },

    /// Traverse the tree with a simulated call stack
    Traverse {
        #[arg(value_enum)]
        order: OrderArg,
    },

    /// Show height, node count, validity and the serialized tree
    Info,
}

#[derive(Subcommand, Debug)]
pub enum GraphCommands {
    /// Breadth-first traversal
    Bfs,
    /// Depth-first traversal
    Dfs,
    /// Single-source shortest paths
    Dijkstra,
    /// Minimum spanning tree, vertex-growing
    Prim,
    /// Minimum spanning tree, edge-sorting
    Kruskal,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OrderArg {
    In,
    Pre,
    Post,
}

impl From<OrderArg> for TraverseOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::In => TraverseOrder::In,
            OrderArg::Pre => TraverseOrder::Pre,
            OrderArg::Post => TraverseOrder::Post,
        }
    }
}
