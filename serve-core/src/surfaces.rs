//! Court surface configuration loader.
//!
//! Loads surface presets from YAML files, so court speeds can be tuned or
//! added without recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! surfaces/
//! ├── hard_court.yaml
//! ├── clay.yaml
//! └── grass.yaml
//! ```
//!
//! A surface carries the horizontal bounce retention ratio; the vertical
//! bounce response is the fixed restitution in the collision module.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Error type for surface loading operations.
#[derive(Debug)]
pub enum SurfaceError {
    IoError(std::io::Error),
    ParseError(serde_yaml::Error),
    NotFound(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::IoError(e) => write!(f, "IO error: {}", e),
            SurfaceError::ParseError(e) => write!(f, "YAML parse error: {}", e),
            SurfaceError::NotFound(name) => write!(f, "Surface not found: {}", name),
        }
    }
}

impl std::error::Error for SurfaceError {}

impl From<std::io::Error> for SurfaceError {
    fn from(err: std::io::Error) -> Self {
        SurfaceError::IoError(err)
    }
}

impl From<serde_yaml::Error> for SurfaceError {
    fn from(err: serde_yaml::Error) -> Self {
        SurfaceError::ParseError(err)
    }
}

/// Physical properties of a court surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceProperties {
    pub name: String,
    /// Fraction of horizontal speed the ball keeps through the bounce
    pub bounce_velocity_retention: f64,
}

impl SurfaceProperties {
    /// Acrylic hard court - the default; a medium-fast, true bounce
    pub fn hard_court() -> Self {
        Self {
            name: "Hard Court".to_string(),
            bounce_velocity_retention: 0.75,
        }
    }

    /// Clay - the ball bites into the granules and sits up
    pub fn clay() -> Self {
        Self {
            name: "Clay".to_string(),
            bounce_velocity_retention: 0.55,
        }
    }

    /// Grass - a low, skidding bounce
    pub fn grass() -> Self {
        Self {
            name: "Grass".to_string(),
            bounce_velocity_retention: 0.65,
        }
    }
}

impl Default for SurfaceProperties {
    fn default() -> Self {
        Self::hard_court()
    }
}

/// Surface loader with configurable base directory.
pub struct SurfaceCatalog {
    base_path: PathBuf,
}

impl SurfaceCatalog {
    /// Create a new catalog rooted at the given directory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a surface by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let catalog = SurfaceCatalog::new("surfaces");
    /// let clay = catalog.load("clay")?;
    /// ```
    pub fn load(&self, name: &str) -> Result<SurfaceProperties, SurfaceError> {
        let path = self.base_path.join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(SurfaceError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let surface: SurfaceProperties = serde_yaml::from_str(&contents)?;
        Ok(surface)
    }

    /// List all available surfaces.
    pub fn list(&self) -> Result<Vec<String>, SurfaceError> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name.ends_with(".yaml") {
                names.push(name.trim_end_matches(".yaml").to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn get_surfaces_path() -> PathBuf {
        let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(manifest_dir).join("..").join("surfaces")
    }

    #[test]
    fn test_load_existing_surface() {
        let catalog = SurfaceCatalog::new(get_surfaces_path());
        let result = catalog.load("clay");

        assert!(result.is_ok(), "Should load clay: {:?}", result.err());
        let surface = result.unwrap();
        assert_eq!(surface.name, "Clay");
        assert!((0.0..=1.0).contains(&surface.bounce_velocity_retention));
    }

    #[test]
    fn test_load_nonexistent_surface() {
        let catalog = SurfaceCatalog::new(get_surfaces_path());
        let result = catalog.load("carpet_xyz");

        assert!(result.is_err());
        match result {
            Err(SurfaceError::NotFound(name)) => {
                assert_eq!(name, "carpet_xyz");
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_list_surfaces() {
        let catalog = SurfaceCatalog::new(get_surfaces_path());
        let result = catalog.list();

        assert!(result.is_ok());
        let surfaces = result.unwrap();
        for expected in ["clay", "grass", "hard_court"] {
            assert!(
                surfaces.contains(&expected.to_string()),
                "Missing {}",
                expected
            );
        }
    }

    #[test]
    fn test_builtin_surfaces_are_ordered_by_pace() {
        let clay = SurfaceProperties::clay();
        let grass = SurfaceProperties::grass();
        let hard = SurfaceProperties::hard_court();

        assert!(clay.bounce_velocity_retention < grass.bounce_velocity_retention);
        assert!(grass.bounce_velocity_retention < hard.bounce_velocity_retention);
    }

    #[test]
    fn test_files_match_builtins() {
        let catalog = SurfaceCatalog::new(get_surfaces_path());
        assert_eq!(catalog.load("clay").unwrap(), SurfaceProperties::clay());
        assert_eq!(catalog.load("grass").unwrap(), SurfaceProperties::grass());
        assert_eq!(
            catalog.load("hard_court").unwrap(),
            SurfaceProperties::hard_court()
        );
    }
}
