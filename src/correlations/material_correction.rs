use super::round_to;
use crate::error::{finite, CalcResult, ValidationError};
use crate::material_db::{self, WALL_THICKNESS_GRID_IN};

// mm → inch 환산 오차로 격자 끝점이 밀려나지 않게 하는 여유
const GRID_TOLERANCE_IN: f64 = 1e-9;

/// 재질명과 관 두께(인치)로 관벽 보정계수를 구한다(소수 4자리).
///
/// 재질명은 대소문자를 구분하지 않고 정확히 일치해야 하며,
/// 두께가 [0.020, 0.109] in 밖이면 거부한다.
pub fn material_wall_correction(material: &str, thickness_in: f64) -> CalcResult<f64> {
    finite("tube_wall_thickness_in", thickness_in)?;
    let known = material_db::find_material(material).ok_or_else(|| {
        ValidationError::UnknownMaterial {
            material: material.to_string(),
        }
    })?;
    let min = WALL_THICKNESS_GRID_IN[0] - GRID_TOLERANCE_IN;
    let max = WALL_THICKNESS_GRID_IN[WALL_THICKNESS_GRID_IN.len() - 1] + GRID_TOLERANCE_IN;
    if !(min..=max).contains(&thickness_in) {
        return Err(ValidationError::OutOfRange {
            name: "tube_wall_thickness_in",
            value: thickness_in,
            constraint: "0.020 ~ 0.109 in",
        });
    }
    let value = material_db::wall_factor(known.name, thickness_in).ok_or_else(|| {
        ValidationError::UnknownMaterial {
            material: material.to_string(),
        }
    })?;
    Ok(round_to(value.factor, 4))
}
