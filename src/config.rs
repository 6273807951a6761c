use crate::params::{Parameters, ViewMode};
use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fps_cap: u32,
    pub enable_color: bool,
    pub view_mode: ViewMode,
    pub speed: f64,
    pub distance_scale: f64,
    pub central_size_scale: f64,
    pub body_size_scale: f64,
    pub show_orbits: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            fps_cap: 60,
            enable_color: true,
            view_mode: p.view_mode,
            speed: p.speed_multiplier,
            distance_scale: p.distance_scale,
            central_size_scale: p.central_body_size_scale,
            body_size_scale: p.body_size_scale,
            show_orbits: p.show_orbits,
        }
    }
}

impl Settings {
    /// Starting control-panel values, clamped into their slider ranges.
    pub fn parameters(&self) -> Parameters {
        Parameters {
            view_mode: self.view_mode,
            speed_multiplier: self.speed,
            distance_scale: self.distance_scale,
            central_body_size_scale: self.central_size_scale,
            body_size_scale: self.body_size_scale,
            show_orbits: self.show_orbits,
        }
        .clamped()
    }

    pub fn fps(&self) -> u32 {
        self.fps_cap.clamp(10, 240)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(fps) = cli.fps {
            self.fps_cap = fps;
        }
        if cli.mono {
            self.enable_color = false;
        }
        if cli.realistic {
            self.view_mode = ViewMode::Realistic;
        }
        if cli.illustrative {
            self.view_mode = ViewMode::Illustrative;
        }
        if let Some(v) = cli.speed {
            self.speed = v;
        }
        if let Some(v) = cli.distance {
            self.distance_scale = v;
        }
        if let Some(v) = cli.sun_size {
            self.central_size_scale = v;
        }
        if let Some(v) = cli.body_size {
            self.body_size_scale = v;
        }
        if cli.hide_orbits {
            self.show_orbits = false;
        }
    }
}

/// Animated solar system in the terminal. Click a planet for details.
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about)]
pub struct Cli {
    /// Settings file (JSON). Defaults to the per-user config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log file. Defaults to the per-user data directory.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Frame cap (10-240).
    #[arg(long)]
    pub fps: Option<u32>,

    /// Disable truecolor output.
    #[arg(long, default_value_t = false)]
    pub mono: bool,

    /// Start in realistic (proportional) view.
    #[arg(long, default_value_t = false, conflicts_with = "illustrative")]
    pub realistic: bool,

    /// Start in illustrative (evenly spaced) view.
    #[arg(long, default_value_t = false)]
    pub illustrative: bool,

    /// Speed multiplier (0.1-10).
    #[arg(long)]
    pub speed: Option<f64>,

    /// Distance scale (0.1-2).
    #[arg(long)]
    pub distance: Option<f64>,

    /// Sun size scale (0.1-2).
    #[arg(long)]
    pub sun_size: Option<f64>,

    /// Planet size scale (0.1-2).
    #[arg(long)]
    pub body_size: Option<f64>,

    /// Start with orbit paths hidden.
    #[arg(long, default_value_t = false)]
    pub hide_orbits: bool,
}

pub struct Paths {
    pub settings_path: PathBuf,
    pub log_path: PathBuf,
}

pub fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "solarium", "Solarium")
        .context("could not resolve project directories")?;
    let config_dir = proj.config_dir().to_path_buf();
    let data_dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating {}", data_dir.display()))?;
    Ok(Paths {
        settings_path: config_dir.join("settings.json"),
        log_path: data_dir.join("solarium.log"),
    })
}

/// Missing file means defaults; a broken file is reported and ignored.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let text = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    match serde_json::from_str::<Settings>(&text) {
        Ok(s) => Ok(s),
        Err(e) => {
            warn!("ignoring {}: {e}", path.display());
            Ok(Settings::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("solarium-{}-{name}", std::process::id()));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("solarium-definitely-missing.json");
        assert_eq!(load_settings(&path).unwrap(), Settings::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let path = temp_file("partial.json", r#"{ "view_mode": "realistic", "speed": 3.0 }"#);
        let s = load_settings(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(s.view_mode, ViewMode::Realistic);
        assert_eq!(s.speed, 3.0);
        assert!(s.show_orbits);
        assert_eq!(s.fps_cap, 60);
    }

    #[test]
    fn garbage_file_falls_back() {
        let path = temp_file("garbage.json", "{ not json");
        let s = load_settings(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let s = Settings { speed: 99.0, body_size_scale: 0.0, fps_cap: 1, ..Settings::default() };
        let p = s.parameters();
        assert_eq!(p.speed_multiplier, 10.0);
        assert!((p.body_size_scale - 0.1).abs() < 1e-9);
        assert_eq!(s.fps(), 10);
    }

    #[test]
    fn cli_overrides_file() {
        let cli = Cli::parse_from(["solarium", "--realistic", "--speed", "2.5", "--hide-orbits", "--mono"]);
        let mut s = Settings::default();
        s.apply_cli(&cli);
        assert_eq!(s.view_mode, ViewMode::Realistic);
        assert_eq!(s.speed, 2.5);
        assert!(!s.show_orbits);
        assert!(!s.enable_color);
    }
}
