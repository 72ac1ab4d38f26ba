//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notezone_core` linkage.
//! - Print the note tree of the resolved data directory for quick inspection.

use notezone_core::{AppPaths, DocumentStore, Node};

#[tokio::main]
async fn main() {
    println!("notezone_core ping={}", notezone_core::ping());
    println!("notezone_core version={}", notezone_core::core_version());

    let paths = AppPaths::resolve();
    println!("notes_dir={}", paths.notes_dir.display());

    let store = DocumentStore::new(paths.notes_dir);
    match store.try_list_tree().await {
        Ok(tree) => print_nodes(&tree, 0),
        Err(err) => eprintln!("tree unavailable: {err}"),
    }
}

fn print_nodes(nodes: &[Node], depth: usize) {
    for node in nodes {
        let marker = if node.is_folder() { "+" } else { "-" };
        println!("{}{marker} {} ({})", "  ".repeat(depth), node.title, node.path);
        print_nodes(node.children(), depth + 1);
    }
}
