use crate::error::{CliError, Result};
use cosrod::core::elastics::params::{BendingMatrix, MaterialParams};
use cosrod::core::models::rod::{RodBuffers, RodView};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct NodeStates {
    positions: Vec<[f64; 3]>,
    frames: Vec<[f64; 3]>,
}

/// A scalar shared by every node, or one value per node.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum PerNode<T> {
    Uniform(T),
    Each(Vec<T>),
}

impl<T: Copy> PerNode<T> {
    fn expand(&self, name: &str, num_nodes: usize) -> Result<Vec<T>> {
        match self {
            PerNode::Uniform(value) => Ok(vec![*value; num_nodes]),
            PerNode::Each(values) if values.len() == num_nodes => Ok(values.clone()),
            PerNode::Each(values) => Err(CliError::Rod(format!(
                "'material.{}' lists {} values for {} nodes",
                name,
                values.len(),
                num_nodes
            ))),
        }
    }
}

/// Bending response: an isotropic constant, one 2×2 matrix for all nodes, or a matrix
/// per node. Matrices are written row by row.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum BendingSpec {
    Isotropic(f64),
    Matrix([[f64; 2]; 2]),
    Each(Vec<[[f64; 2]; 2]>),
}

impl BendingSpec {
    fn expand(&self, num_nodes: usize) -> Result<Vec<BendingMatrix>> {
        let from_rows = |rows: &[[f64; 2]; 2]| {
            BendingMatrix::from_row_major(&[rows[0][0], rows[0][1], rows[1][0], rows[1][1]])
        };
        match self {
            BendingSpec::Isotropic(b) => Ok(vec![BendingMatrix::diagonal(*b); num_nodes]),
            BendingSpec::Matrix(rows) => Ok(vec![from_rows(rows); num_nodes]),
            BendingSpec::Each(all) if all.len() == num_nodes => {
                Ok(all.iter().map(from_rows).collect())
            }
            BendingSpec::Each(all) => Err(CliError::Rod(format!(
                "'material.bending' lists {} matrices for {} nodes",
                all.len(),
                num_nodes
            ))),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct MaterialSpec {
    stretch: PerNode<f64>,
    twist: PerNode<f64>,
    bending: BendingSpec,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct RawRodFile {
    current: NodeStates,
    equilibrium: Option<NodeStates>,
    material: MaterialSpec,
}

/// A rod loaded from TOML and flattened into the buffer layout the core expects.
///
/// ```toml
/// [current]
/// positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], ...]
/// frames = [[0.0, 1.0, 0.0], [0.0, 1.0, 0.0], ...]
///
/// [equilibrium]          # optional, defaults to [current]
/// positions = [...]
/// frames = [...]
///
/// [material]
/// stretch = 1.0          # or one value per node
/// twist = 1.0            # or one value per node
/// bending = 1.0          # isotropic, [[b00, b01], [b10, b11]], or one matrix per node
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RodFile {
    positions: Vec<f64>,
    frames: Vec<f64>,
    equil_positions: Vec<f64>,
    equil_frames: Vec<f64>,
    material: Vec<f64>,
    bending: Vec<f64>,
}

impl RodFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading rod from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let raw: RawRodFile = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        Self::from_raw(raw)
    }

    #[cfg(test)]
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawRodFile =
            toml::from_str(content).map_err(|e| CliError::Rod(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawRodFile) -> Result<Self> {
        let num_nodes = raw.current.positions.len();
        let equilibrium = raw.equilibrium.unwrap_or_else(|| raw.current.clone());

        for (name, len) in [
            ("current.frames", raw.current.frames.len()),
            ("equilibrium.positions", equilibrium.positions.len()),
            ("equilibrium.frames", equilibrium.frames.len()),
        ] {
            if len != num_nodes {
                return Err(CliError::Rod(format!(
                    "'{}' lists {} nodes, but 'current.positions' lists {}",
                    name, len, num_nodes
                )));
            }
        }

        let stretch = raw.material.stretch.expand("stretch", num_nodes)?;
        let twist = raw.material.twist.expand("twist", num_nodes)?;
        let material = stretch
            .into_iter()
            .zip(twist)
            .flat_map(|(k, beta)| MaterialParams::new(k, beta).to_buffer_entry())
            .collect();
        let bending = raw
            .material
            .bending
            .expand(num_nodes)?
            .into_iter()
            .flat_map(BendingMatrix::to_row_major)
            .collect();

        debug!(num_nodes, "Rod flattened into buffers.");
        Ok(Self {
            positions: flatten(&raw.current.positions),
            frames: flatten(&raw.current.frames),
            equil_positions: flatten(&equilibrium.positions),
            equil_frames: flatten(&equilibrium.frames),
            material,
            bending,
        })
    }

    pub fn buffers(&self) -> RodBuffers<'_> {
        RodBuffers {
            positions: &self.positions,
            frames: &self.frames,
            equil_positions: &self.equil_positions,
            equil_frames: &self.equil_frames,
            material: &self.material,
            bending: &self.bending,
        }
    }

    pub fn view(&self) -> Result<RodView<'_>> {
        Ok(RodView::new(self.buffers())?)
    }
}

fn flatten(vectors: &[[f64; 3]]) -> Vec<f64> {
    vectors.iter().flatten().copied().collect()
}
