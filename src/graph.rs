//! Artist relationship graphs for the network chart.
//!
//! Two JSON layouts are produced from the same artist → related-artists mapping:
//! [`Graph`] places every artist on a circle and names edge endpoints by artist,
//! [`IndexedGraph`] numbers the artists and refers to them by index.

use crate::{Result, SpotifyError};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

/// Radius of the circle layout.
pub const GRAPH_RADIUS: f64 = 10.0;

/// Ordered mapping from an artist to the artists it links to.
///
/// Loaded from a JSON object (`{"Nas": ["Mobb Deep", "Jay-Z"], ...}`); key order
/// is kept and decides node order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistLinks {
    entries: Vec<(String, Vec<String>)>,
}

impl ArtistLinks {
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        Self { entries }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let entries = map
            .into_iter()
            .map(|(artist, related)| {
                let related: Vec<String> = serde_json::from_value(related).map_err(|e| {
                    SpotifyError::Parse(format!("related artists of '{artist}': {e}"))
                })?;
                Ok((artist, related))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn artists(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(artist, _)| artist.as_str())
    }

    /// Every `(artist, related)` pair in mapping order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(artist, related)| {
            related
                .iter()
                .map(move |other| (artist.as_str(), other.as_str()))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// `n` points evenly spaced on a circle: point `i` sits at angle `i * 2π / n`.
pub fn circle_points(radius: f64, n: usize) -> Vec<Point> {
    if n == 0 {
        return Vec::new();
    }
    let step = 2.0 * PI / n as f64;
    (0..n)
        .map(|i| {
            let angle = i as f64 * step;
            Point {
                x: radius * angle.cos(),
                y: radius * angle.sin(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

/// Circle layout: `{"nodes": [{id, x, y}], "edges": [{from, to}]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// One node per artist on a circle of [`GRAPH_RADIUS`], one directed edge per link.
    ///
    /// Reverse pairs are kept as separate edges.
    pub fn from_links(links: &ArtistLinks) -> Self {
        let points = circle_points(GRAPH_RADIUS, links.len());
        let nodes = links
            .artists()
            .zip(points)
            .map(|(artist, point)| Node {
                id: artist.to_string(),
                x: point.x,
                y: point.y,
            })
            .collect();

        let edges = links
            .pairs()
            .map(|(from, to)| Edge {
                from: from.to_string(),
                to: to.to_string(),
            })
            .collect();

        Self { nodes, edges }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedNode {
    pub id: usize,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: usize,
    pub target: usize,
}

/// Index layout: `{"nodes": [{id, name}], "links": [{source, target}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedGraph {
    pub nodes: Vec<IndexedNode>,
    pub links: Vec<Link>,
}

impl IndexedGraph {
    /// Number artists in mapping order and link them by index.
    ///
    /// A related artist that is not itself a mapping key has no index; that link
    /// is dropped with a warning.
    pub fn from_links(links: &ArtistLinks) -> Self {
        let nodes: Vec<IndexedNode> = links
            .artists()
            .enumerate()
            .map(|(id, name)| IndexedNode {
                id,
                name: name.to_string(),
            })
            .collect();

        let index_of = |name: &str| nodes.iter().position(|node| node.name == name);

        let links = links
            .pairs()
            .filter_map(|(from, to)| match (index_of(from), index_of(to)) {
                (Some(source), Some(target)) => Some(Link { source, target }),
                _ => {
                    log::warn!("Dropping link {from} -> {to}: '{to}' is not a node");
                    None
                }
            })
            .collect();

        Self { nodes, links }
    }
}

/// Write `value` as pretty JSON, creating parent directories as needed.
///
/// The document is serialized before the file is touched.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    log::info!("Wrote JSON file {}", path.display());
    Ok(())
}
