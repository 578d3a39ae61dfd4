use crate::foundation::error::{LyrError, LyrResult};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Name of a block (verse, chorus, ...) as written in the document's `order`.
pub type BlockName = String;

/// A lyrics document: font size, block order, block rows and an optional background image.
///
/// Constructed whole by one of the loaders and immutable afterwards. Every name in
/// [`order`](Self::order) is guaranteed to resolve to a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LyricsDocument {
    font_size: u32,
    order: Vec<BlockName>,
    blocks: BTreeMap<BlockName, Vec<String>>,
    image: Option<String>,
}

/// Borrowed view of one block in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block<'a> {
    /// Block name.
    pub name: &'a str,
    /// Rows in display order.
    pub rows: &'a [String],
}

impl Block<'_> {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the block has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(serde::Deserialize)]
struct RawDocument {
    font_size: serde_json::Value,
    order: Vec<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(flatten)]
    fields: BTreeMap<String, serde_json::Value>,
}

// Hand-edited documents carry the size as an integer, an integral float or a quoted numeral.
fn resolve_font_size(value: &serde_json::Value) -> LyrResult<u32> {
    let numeral = match value {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.trim().to_string(),
        _ => String::new(),
    };
    let parsed = numeral.parse::<u64>().ok().or_else(|| {
        numeral
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    });
    let Some(size) = parsed else {
        return Err(LyrError::malformed(format!(
            "font_size must be a positive integer, got {value}"
        )));
    };
    u32::try_from(size)
        .map_err(|_| LyrError::malformed(format!("font_size {size} is out of range")))
}

impl LyricsDocument {
    /// Build a document from already-separated parts, enforcing all invariants.
    pub fn new(
        font_size: u32,
        order: Vec<BlockName>,
        blocks: BTreeMap<BlockName, Vec<String>>,
        image: Option<String>,
    ) -> LyrResult<Self> {
        if font_size == 0 {
            return Err(LyrError::malformed("font_size must be > 0"));
        }

        let mut seen = BTreeSet::new();
        for name in &order {
            if !seen.insert(name.as_str()) {
                return Err(LyrError::malformed(format!(
                    "block '{name}' appears more than once in order"
                )));
            }
            if !blocks.contains_key(name) {
                return Err(LyrError::malformed(format!(
                    "order references block '{name}' which is not defined"
                )));
            }
        }

        Ok(Self {
            font_size,
            order,
            blocks,
            image,
        })
    }

    /// Parse a document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> LyrResult<Self> {
        let raw: RawDocument = serde_json::from_reader(r)
            .map_err(|e| LyrError::malformed(format!("syntax error: {e}")))?;
        Self::from_raw(raw)
    }

    /// Parse a document from a JSON string.
    pub fn from_json_str(s: &str) -> LyrResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a document from a JSON file on disk.
    ///
    /// Parse and validation failures are reported with the file path prepended.
    pub fn from_path(path: impl AsRef<Path>) -> LyrResult<Self> {
        let path = path.as_ref();
        tracing::info!("parsing lyrics of {}", path.display());
        let f = File::open(path).map_err(|e| {
            LyrError::malformed(format!("open lyrics document '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f)).map_err(|e| match e {
            LyrError::MalformedInput(msg) => {
                LyrError::malformed(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    fn from_raw(raw: RawDocument) -> LyrResult<Self> {
        let font_size = resolve_font_size(&raw.font_size)?;

        let mut blocks = BTreeMap::new();
        for name in &raw.order {
            let Some(value) = raw.fields.get(name) else {
                return Err(LyrError::malformed(format!(
                    "order references block '{name}' which is not defined"
                )));
            };
            let rows: Vec<String> = serde_json::from_value(value.clone()).map_err(|_| {
                LyrError::malformed(format!("block '{name}' must be an array of strings"))
            })?;
            blocks.insert(name.clone(), rows);
        }

        Self::new(font_size, raw.order, blocks, raw.image)
    }

    /// Declared font size (points).
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Block names in display order.
    pub fn order(&self) -> &[BlockName] {
        &self.order
    }

    /// Background image file name, relative to the images directory.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Rows of the named block.
    pub fn rows(&self, name: &str) -> Option<&[String]> {
        self.blocks.get(name).map(Vec::as_slice)
    }

    /// Blocks in document order.
    pub fn blocks(&self) -> impl Iterator<Item = Block<'_>> {
        self.order.iter().filter_map(|name| {
            self.blocks.get(name).map(|rows| Block {
                name: name.as_str(),
                rows: rows.as_slice(),
            })
        })
    }

    /// Row count per block named in the order.
    pub fn block_lengths(&self) -> BTreeMap<&str, usize> {
        self.blocks().map(|b| (b.name, b.len())).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lyrics/document.rs"]
mod tests;
