use std::{fs, path::Path, path::PathBuf};

use gridmaze_core::{
    dims::Dims,
    solver::{AStar, DepthFirst, PathFinder},
};
use ron::{self, extensions::Extensions, ser::PrettyConfig};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum SolverKind {
    #[default]
    #[value(name = "astar")]
    AStar,
    DepthFirst,
}

impl SolverKind {
    pub fn finder(self) -> Box<dyn PathFinder> {
        match self {
            SolverKind::AStar => Box::new(AStar),
            SolverKind::DepthFirst => Box::new(DepthFirst),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazePreset {
    pub title: String,
    pub width: u16,
    pub height: u16,
    #[serde(default)]
    pub default: bool,
}

impl MazePreset {
    pub fn new(title: impl Into<String>, width: u16, height: u16) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            default: false,
        }
    }

    pub fn default_one(mut self) -> Self {
        self.default = true;
        self
    }

    pub fn size(&self) -> Dims {
        Dims(self.width as i32, self.height as i32)
    }
}

pub fn default_presets() -> Vec<MazePreset> {
    vec![
        MazePreset::new("Small", 15, 15),
        MazePreset::new("Medium", 29, 29).default_one(),
        MazePreset::new("Large", 51, 51),
        MazePreset::new("Huge", 101, 101),
    ]
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub color: Option<bool>,
    #[serde(default)]
    pub corner_fixup: Option<bool>,
    #[serde(default)]
    pub solver: Option<SolverKind>,
    #[serde(default)]
    pub mazes: Option<Vec<MazePreset>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_color(mut self, value: bool) -> Self {
        self.color = Some(value);
        self
    }

    pub fn get_color(&self) -> bool {
        self.color.unwrap_or(true)
    }

    pub fn set_corner_fixup(mut self, value: bool) -> Self {
        self.corner_fixup = Some(value);
        self
    }

    pub fn get_corner_fixup(&self) -> bool {
        self.corner_fixup.unwrap_or(true)
    }

    pub fn set_solver(mut self, value: SolverKind) -> Self {
        self.solver = Some(value);
        self
    }

    pub fn get_solver(&self) -> SolverKind {
        self.solver.unwrap_or_default()
    }

    pub fn set_mazes(mut self, value: Vec<MazePreset>) -> Self {
        self.mazes = Some(value);
        self
    }

    /// Configured presets, or the built-in ones when the list is missing or empty.
    pub fn get_mazes(&self) -> Vec<MazePreset> {
        match &self.mazes {
            Some(mazes) if !mazes.is_empty() => mazes.clone(),
            _ => default_presets(),
        }
    }

    /// Preset marked as default, falls back to the first one.
    pub fn get_default_preset(&self) -> MazePreset {
        let mazes = self.get_mazes();
        mazes
            .iter()
            .find(|preset| preset.default)
            .or_else(|| mazes.first())
            .cloned()
            .unwrap_or_else(|| MazePreset::new("Medium", 29, 29))
    }

    pub fn find_preset(&self, title: &str) -> Option<MazePreset> {
        self.get_mazes()
            .into_iter()
            .find(|preset| preset.title.eq_ignore_ascii_case(title))
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridmaze")
            .join("settings.ron")
    }

    fn ron_options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn from_ron(text: &str) -> Result<Self, AppError> {
        Ok(Self::ron_options().from_str(text)?)
    }

    pub fn to_ron(&self) -> Result<String, AppError> {
        Ok(Self::ron_options().to_string_pretty(self, PrettyConfig::default())?)
    }

    /// Loads settings from `path`, writing the default file there first if there is none.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                log::debug!("Loading settings from {:?}", path);
                Self::from_ron(&text)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {:?}, creating default", path);
                Self::reset_config(path)?;
                Self::from_ron(DEFAULT_SETTINGS)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn reset_config(path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("gridmaze-test-{}-{}", std::process::id(), name))
            .join("settings.ron")
    }

    #[test]
    fn default_file_matches_builtin() {
        let settings = Settings::from_ron(DEFAULT_SETTINGS).unwrap();
        assert!(settings.get_color());
        assert!(settings.get_corner_fixup());
        assert_eq!(settings.get_solver(), SolverKind::AStar);
        assert_eq!(settings.get_mazes(), default_presets());
        assert_eq!(settings.get_default_preset().size(), Dims(29, 29));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings = Settings::from_ron("(solver: DepthFirst)").unwrap();
        assert_eq!(settings.get_solver(), SolverKind::DepthFirst);
        assert!(settings.get_color());
        assert_eq!(settings.get_mazes(), default_presets());
    }

    #[test]
    fn presets() {
        let settings = Settings::new().set_mazes(vec![
            MazePreset::new("Tiny", 5, 5),
            MazePreset::new("Wide", 61, 21),
        ]);
        // no default marked, first one wins
        assert_eq!(settings.get_default_preset().title, "Tiny");
        assert_eq!(settings.find_preset("wide").map(|p| p.size()), Some(Dims(61, 21)));
        assert_eq!(settings.find_preset("Huge"), None);

        let empty = Settings::new().set_mazes(vec![]);
        assert_eq!(empty.get_default_preset().title, "Medium");
    }

    #[test]
    fn ron_roundtrip() {
        let settings = Settings::new()
            .set_color(false)
            .set_corner_fixup(false)
            .set_solver(SolverKind::DepthFirst);
        let text = settings.to_ron().unwrap();
        assert_eq!(Settings::from_ron(&text).unwrap(), settings);
    }

    #[test]
    fn invalid_file_is_an_error() {
        assert!(matches!(
            Settings::from_ron("(color: maybe)"),
            Err(AppError::Settings(_))
        ));
    }

    #[test]
    fn load_creates_file() {
        let path = temp_path("load");
        let _ = fs::remove_file(&path);

        let settings = Settings::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(settings.get_default_preset().title, "Medium");

        fs::write(&path, "(color: false)").unwrap();
        assert!(!Settings::load(&path).unwrap().get_color());

        Settings::reset_config(&path).unwrap();
        assert!(Settings::load(&path).unwrap().get_color());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
