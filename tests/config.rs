use std::fs;
use std::path::PathBuf;

use condenser_design::config::{self, Config, ConfigError};
use condenser_design::correlations::SaturationModel;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("condenser_design_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("scratch dir");
    dir
}

#[test]
fn empty_file_gives_defaults() {
    let cfg = Config::from_toml_str("").expect("empty config");
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.saturation_model, SaturationModel::CurveFit);
    assert_eq!(cfg.allowances.area_step_m2, 50.0);
    assert_eq!(cfg.allowances.fouling_margin, 0.05);
    assert_eq!(cfg.allowances.pressure_drop_margin, 1.2);
    assert_eq!(cfg.nozzles.condensate_velocity_m_s, [0.5, 1.0]);
    assert_eq!(cfg.nozzles.cooling_water_velocity_m_s, [2.0, 2.5]);
    assert_eq!(cfg.nozzles.stock_step_mm, 50);
    assert_eq!(cfg.advisories.length_diameter_ratio, [2.0, 3.0]);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let cfg = Config::from_toml_str(
        r#"
saturation_model = "if97"

[allowances]
pressure_drop_margin = 1.0
"#,
    )
    .expect("partial config");
    assert_eq!(cfg.saturation_model, SaturationModel::If97);
    assert_eq!(cfg.allowances.pressure_drop_margin, 1.0);
    assert_eq!(cfg.allowances.area_step_m2, 50.0);
    assert_eq!(cfg.nozzles, Config::default().nozzles);
}

#[test]
fn malformed_file_is_reported() {
    let err = Config::from_toml_str("saturation_model = \"steam-tables\"").unwrap_err();
    assert!(matches!(err, ConfigError::Serde(_)));
}

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = scratch_dir("create");
    let path = dir.join("config.toml");

    let cfg = config::load_or_default(&path).expect("load or create");
    assert_eq!(cfg, Config::default());
    assert!(path.exists());

    let again = config::load_or_default(&path).expect("reload");
    assert_eq!(again, cfg);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn saved_settings_round_trip() {
    let dir = scratch_dir("save");
    let path = dir.join("config.toml");

    let mut cfg = Config::default();
    cfg.saturation_model = SaturationModel::If97;
    cfg.nozzles.stock_step_mm = 25;
    cfg.save(&path).expect("save");

    let loaded = config::load_or_default(&path).expect("load");
    assert_eq!(loaded, cfg);
    let _ = fs::remove_dir_all(&dir);
}
