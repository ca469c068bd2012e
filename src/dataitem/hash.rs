//! Value hashing and order-insensitive collection equality.

use sha2::{Digest, Sha256};

use super::DataItem;

/// Unit separator between hash key fields.
const SEP: char = '\u{1f}';

impl DataItem {
    /// Canonical serialization used as hashing input.
    ///
    /// Stable across runs; container items fold in their sorted fact set so
    /// two containers with the same facts in different order agree.
    pub fn hash_key(&self) -> String {
        match self {
            DataItem::Number(n) => format!("num{SEP}{n}"),
            DataItem::Boolean(b) => format!("boo{SEP}{}", *b as u8),
            DataItem::Blob(s) => format!("txt{SEP}{s}"),
            DataItem::Time(t) => format!("tim{SEP}{t}"),
            DataItem::WikiPage(subject) => format!("wpg{SEP}{}", subject.key()),
            DataItem::Error(msgs) => format!("err{SEP}{}", msgs.join("\u{1e}")),
            DataItem::Container(data) => {
                let mut fact_hashes: Vec<String> = data
                    .fact_pairs()
                    .map(|(prop, item)| format!("{}{SEP}{}", prop.key(), item.hash_key()))
                    .collect();
                fact_hashes.sort();
                format!("con{SEP}{}{SEP}{}", data.subject().key(), fact_hashes.join("\u{1e}"))
            }
        }
    }

    /// Fixed-length hex digest of [`DataItem::hash_key`].
    pub fn hash(&self) -> String {
        hex::encode(Sha256::digest(self.hash_key().as_bytes()))
    }
}

/// Order-insensitive multiset equality over two value collections.
///
/// Each value is hashed, the hashes are sorted and concatenated, and the
/// resulting strings compared. A non-cryptographic collision between
/// distinct multisets is accepted; this check only drives change detection.
pub fn equal_data_items(a: &[DataItem], b: &[DataItem]) -> bool {
    fn combined(items: &[DataItem]) -> String {
        let mut hashes: Vec<String> = items.iter().map(DataItem::hash).collect();
        hashes.sort();
        hashes.join("___")
    }
    combined(a) == combined(b)
}
