//! Tabular and structured views of a built index

use super::kmer::KmerIndex;
use crate::graph::{Color, NodeId};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// One exported index row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KmerRow {
    pub start: NodeId,
    pub kmer: String,
    pub colors: Vec<Color>,
}

impl KmerIndex {
    /// Rows sorted by k-mer
    pub fn rows(&self) -> Vec<KmerRow> {
        self.iter()
            .map(|(kmer, entry)| KmerRow {
                start: entry.start,
                kmer: kmer.to_string(),
                colors: entry.colors.iter().cloned().collect(),
            })
            .collect()
    }

    /// `[{"start": .., "kmer": .., "colors": [..]}, ...]`
    pub fn to_json_rows(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self.rows())
    }

    /// `{"kmer": {"start": .., "colors": [..]}, ...}`
    pub fn to_json_map(&self) -> Value {
        let map: Map<String, Value> = self
            .iter()
            .map(|(kmer, entry)| {
                let colors: Vec<&str> = entry.colors.iter().map(Color::as_str).collect();
                (kmer.to_string(), json!({ "start": entry.start, "colors": colors }))
            })
            .collect();
        Value::Object(map)
    }

    /// CSV with header `start,kmer,colors`; colors are `;`-joined
    pub fn to_csv(&self) -> String {
        let mut out = String::from("start,kmer,colors\n");
        for row in self.rows() {
            let colors: Vec<&str> = row.colors.iter().map(Color::as_str).collect();
            out.push_str(&format!(
                "{},{},{}\n",
                row.start.as_u64(),
                csv_field(&row.kmer),
                csv_field(&colors.join(";"))
            ));
        }
        out
    }
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{GraphStore, PropertyMap, NAME_KEY};
    use crate::index::KmerIndex;

    fn two_colored_pair() -> KmerIndex {
        let mut store = GraphStore::new();
        let mut ids = Vec::new();
        for base in ["A", "C"] {
            let mut props = PropertyMap::new();
            props.insert(NAME_KEY.to_string(), base.into());
            ids.push(store.create_node_with_properties(None, "Base", props).unwrap());
        }
        store.create_edge(ids[0], ids[1], "h1").unwrap();
        store.create_edge(ids[0], ids[1], "h,2").unwrap();
        KmerIndex::build(&store, 2).unwrap()
    }

    #[test]
    fn test_rows_and_csv() {
        let index = two_colored_pair();
        let rows = index.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kmer, "AC");

        assert_eq!(index.to_csv(), "start,kmer,colors\n1,AC,\"h,2;h1\"\n");
    }

    #[test]
    fn test_json_shapes() {
        let index = two_colored_pair();
        let rows = index.to_json_rows().unwrap();
        assert_eq!(rows[0]["start"], 1);
        assert_eq!(rows[0]["colors"][1], "h1");

        let map = index.to_json_map();
        assert_eq!(map["AC"]["start"], 1);
        assert_eq!(map["AC"]["colors"].as_array().map(|c| c.len()), Some(2));
    }
}
