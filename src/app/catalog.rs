//! Static catalog of distribution manifests
//!
//! The distribution publishes one manifest per category, grouped by content
//! domain and kind. The catalog is a fixed tree known at compile time; the
//! rest of the application works on its flattened view, keyed by the path of
//! names joined with `/` (for example `seiga/meta_data`).

/// A node in the catalog tree: either a manifest path or a nested table
#[derive(Debug, Clone, Copy)]
pub enum CatalogNode {
    /// Leaf: manifest URL path relative to the distribution origin
    Path(&'static str),
    /// Nested group of named entries
    Table(&'static [(&'static str, CatalogNode)]),
}

/// A flattened catalog view: `(composite key, manifest path)` pairs in
/// traversal order
pub type CatalogEntries = Vec<(String, String)>;

/// Manifest catalog of the distribution
pub const CATALOG: &[(&str, CatalogNode)] = &[
    (
        "common",
        CatalogNode::Table(&[("tag_list", CatalogNode::Path("/distribution/tags/list.txt"))]),
    ),
    (
        "seiga",
        CatalogNode::Table(&[
            ("meta_data", CatalogNode::Path("/distribution/metadata/list.txt")),
            (
                "image_data",
                CatalogNode::Path("/distribution/image-data/list.txt"),
            ),
            (
                "image_id_list",
                CatalogNode::Path("/distribution/image-id-list/list.txt"),
            ),
        ]),
    ),
    (
        "syunga",
        CatalogNode::Table(&[
            (
                "meta_data",
                CatalogNode::Path("/distribution/adult-metadata/list.txt"),
            ),
            (
                "image_data",
                CatalogNode::Path("/distribution/adult-image-data/list.txt"),
            ),
            (
                "image_id_list",
                CatalogNode::Path("/distribution/adult-image-id-list/list.txt"),
            ),
        ]),
    ),
];

/// Flatten a catalog table into composite-key entries
///
/// Walks the tree depth-first and joins intermediate names with `/`. Output
/// order is first-encountered traversal order, so the flattened view is
/// stable across runs.
pub fn flatten(table: &[(&'static str, CatalogNode)]) -> CatalogEntries {
    let mut flattened = Vec::new();

    for (name, node) in table {
        match node {
            CatalogNode::Path(path) => flattened.push((name.to_string(), path.to_string())),
            CatalogNode::Table(nested) => {
                for (nested_key, path) in flatten(nested) {
                    flattened.push((format!("{}/{}", name, nested_key), path));
                }
            }
        }
    }

    flattened
}

/// Flattened view of the built-in catalog
pub fn flattened_catalog() -> CatalogEntries {
    flatten(CATALOG)
}

/// Select the subset of entries whose key appears in `names`
///
/// Unknown names are ignored here; the CLI reports them separately.
pub fn select(entries: &[(String, String)], names: &[String]) -> CatalogEntries {
    entries
        .iter()
        .filter(|(key, _)| names.iter().any(|name| name == key))
        .cloned()
        .collect()
}
