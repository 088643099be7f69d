use super::GraphLayout;
use artist_stats::graph::write_json_file;
use artist_stats::{ArtistLinks, Graph, IndexedGraph};
use std::path::Path;

/// Build the network graph from a related-artists mapping and write it as JSON.
pub fn handle_graph(
    links_path: &Path,
    output: &Path,
    layout: GraphLayout,
) -> Result<(), Box<dyn std::error::Error>> {
    let links = ArtistLinks::load(links_path)?;
    println!(
        "🕸️  Loaded {} artists from {}",
        links.len(),
        links_path.display()
    );

    match layout {
        GraphLayout::Circle => {
            let graph = Graph::from_links(&links);
            write_json_file(output, &graph)?;
            println!(
                "✅ Wrote {} nodes and {} edges to {}",
                graph.nodes.len(),
                graph.edges.len(),
                output.display()
            );
        }
        GraphLayout::Indexed => {
            let graph = IndexedGraph::from_links(&links);
            write_json_file(output, &graph)?;
            println!(
                "✅ Wrote {} nodes and {} links to {}",
                graph.nodes.len(),
                graph.links.len(),
                output.display()
            );
        }
    }

    Ok(())
}
