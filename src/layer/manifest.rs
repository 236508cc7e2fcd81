use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::foundation::{
    core::BlendMode,
    error::{ZMergeError, ZMergeResult},
};

/// Blend-mode identifier as written in a manifest.
///
/// Manifests in the wild spell the mode as an integer id, a float (`1.0`), a numeric string
/// (`"2"`) or a name (`"screen"`). Resolution to [`BlendMode`] happens in [`ModeId::resolve`],
/// so an unknown value surfaces as [`ZMergeError::InvalidMode`] instead of a parse error.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ModeId {
    /// Integer identifier.
    Int(u64),
    /// Float identifier; must be integral.
    Float(f64),
    /// Numeric string or mode name.
    Text(String),
}

impl ModeId {
    /// Convert to a [`BlendMode`].
    pub fn resolve(&self) -> ZMergeResult<BlendMode> {
        match self {
            ModeId::Int(id) => u8::try_from(*id)
                .map_err(|_| ZMergeError::invalid_mode(format!("mode id {id} out of range")))
                .and_then(BlendMode::from_id),
            ModeId::Float(v) => {
                if v.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(v) {
                    return Err(ZMergeError::invalid_mode(format!(
                        "mode id {v} is not a small non-negative integer"
                    )));
                }
                BlendMode::from_id(*v as u8)
            }
            ModeId::Text(s) => s.parse(),
        }
    }
}

impl From<BlendMode> for ModeId {
    fn from(mode: BlendMode) -> Self {
        ModeId::Int(u64::from(mode.id()))
    }
}

impl Default for ModeId {
    fn default() -> Self {
        BlendMode::Normal.into()
    }
}

/// One manifest entry: where to find a layer's passes and how to blend it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerSpec {
    /// Color pass (RGB or RGBA, 8- or 16-bit).
    #[serde(alias = "I")]
    pub color: PathBuf,
    /// Depth pass (grayscale preferred; color images are converted to luma).
    #[serde(alias = "Z")]
    pub depth: PathBuf,
    /// Blend mode; defaults to normal.
    #[serde(alias = "M", default)]
    pub mode: ModeId,
}

impl LayerSpec {
    /// Resolve this entry's blend mode; `index` labels the error.
    pub fn blend_mode(&self, index: usize) -> ZMergeResult<BlendMode> {
        self.mode.resolve().map_err(|e| match e {
            ZMergeError::InvalidMode(msg) => {
                ZMergeError::invalid_mode(format!("layer {index}: {msg}"))
            }
            other => other,
        })
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ManifestDoc {
    List(Vec<LayerSpec>),
    Object { layers: Vec<LayerSpec> },
}

/// An ordered list of layers plus the directory relative paths resolve against.
#[derive(Clone, Debug, PartialEq)]
pub struct Manifest {
    /// Base directory for relative pass paths.
    pub root: PathBuf,
    /// Layers in input order (the tie-break order for equal depths).
    pub layers: Vec<LayerSpec>,
}

impl Manifest {
    /// Build a manifest from already-parsed entries.
    pub fn new(root: impl Into<PathBuf>, layers: Vec<LayerSpec>) -> ZMergeResult<Self> {
        if layers.is_empty() {
            return Err(ZMergeError::validation("manifest lists no layers"));
        }
        Ok(Self {
            root: root.into(),
            layers,
        })
    }

    /// Parse a manifest from a JSON reader.
    ///
    /// Accepts either a bare array of layer entries or an object with a `layers` array.
    pub fn from_reader<R: std::io::Read>(r: R, root: impl Into<PathBuf>) -> ZMergeResult<Self> {
        let doc: ManifestDoc = serde_json::from_reader(r)
            .map_err(|e| ZMergeError::validation(format!("parse layer manifest JSON: {e}")))?;
        let layers = match doc {
            ManifestDoc::List(layers) | ManifestDoc::Object { layers } => layers,
        };
        Self::new(root, layers)
    }

    /// Parse a manifest file; relative paths resolve against its parent directory.
    pub fn from_path(path: impl AsRef<Path>) -> ZMergeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ZMergeError::validation(format!("open layer manifest '{}': {e}", path.display()))
        })?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_reader(BufReader::new(f), root)
    }

    /// Resolve a pass path against [`Manifest::root`].
    pub fn resolve_path(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }

    /// Resolve every layer's blend mode, failing on the first invalid one.
    pub fn modes(&self) -> ZMergeResult<Vec<BlendMode>> {
        self.layers
            .iter()
            .enumerate()
            .map(|(i, spec)| spec.blend_mode(i))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/manifest.rs"]
mod tests;
