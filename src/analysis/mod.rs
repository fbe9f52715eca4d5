//! Row normalization, filtering, graph assembly and layout.
//!
//! ```text
//!  Table ──normalize──▶ rows ──filter──▶ kept rows ──assemble──▶ RelationGraph
//!                                                                   │
//!                                         Figure ◀──build── Positions ◀──layout
//! ```
//!
//! Every run starts from the table and shares nothing with earlier runs.

pub mod figure;
pub mod filter;
pub mod graph;
pub mod layout;
pub mod normalize;
pub mod pipeline;

pub use figure::{Figure, FigureEdge, FigureNode, Palette};
pub use filter::{FilterOptions, RowFilter};
pub use graph::{Category, GraphStats, RelationGraph};
pub use layout::{DEFAULT_SEED, ForceLayout, Layout, Positions};
pub use normalize::{ColumnSelection, NormalizedRow, normalize, split_items};
pub use pipeline::{Analysis, LayoutConfig, analyze};
