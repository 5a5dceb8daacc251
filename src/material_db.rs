/// 전열관 재질별 관벽 보정계수 표와 선형 보간을 제공한다.
/// 두께 격자는 인치 기준(0.020~0.109 in)이며 값은 HEI 표를 옮긴 참고치이다.
use crate::interp::{self, Interpolated};

/// 보정계수 표의 두께 격자(인치).
pub const WALL_THICKNESS_GRID_IN: [f64; 9] =
    [0.020, 0.022, 0.025, 0.028, 0.035, 0.049, 0.065, 0.083, 0.109];

#[derive(Debug)]
pub struct MaterialData {
    pub name: &'static str,
    pub notes: &'static str,
    /// `WALL_THICKNESS_GRID_IN`과 같은 순서의 보정계수
    pub factors: [f64; 9],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialValue {
    pub factor: f64,
    pub source_thickness_in: f64,
    /// true면 격자 범위 밖이라 가장자리 값으로 클램프됨을 의미한다.
    pub clamped: bool,
}

pub fn materials() -> &'static [MaterialData] {
    MATERIALS
}

/// 입력 화면이 선택지로 쓸 재질명 목록.
pub fn material_names() -> Vec<&'static str> {
    MATERIALS.iter().map(|m| m.name).collect()
}

/// 앞뒤 공백을 무시하고 대소문자 구분 없이 정확히 일치하는 재질을 찾는다.
pub fn find_material(name: &str) -> Option<&'static MaterialData> {
    let name = name.trim();
    MATERIALS.iter().find(|m| m.name.eq_ignore_ascii_case(name))
}

/// 재질과 두께(인치)로 보정계수를 보간한다. 범위 검사는 호출 측 몫이다.
pub fn wall_factor(name: &str, thickness_in: f64) -> Option<MaterialValue> {
    let mat = find_material(name)?;
    let Interpolated {
        value,
        source_x,
        clamped,
    } = interp::interpolate(&WALL_THICKNESS_GRID_IN, &mat.factors, thickness_in)?;
    Some(MaterialValue {
        factor: value,
        source_thickness_in: source_x,
        clamped,
    })
}

const MATERIALS: &[MaterialData] = &[
    MaterialData {
        name: "Cu Fe 194",
        notes: "구리-철 합금",
        factors: [1.042, 1.041, 1.039, 1.038, 1.034, 1.028, 1.020, 1.010, 0.997],
    },
    MaterialData {
        name: "Arsenical Cu",
        notes: "비소 첨가 구리",
        factors: [1.038, 1.037, 1.035, 1.033, 1.029, 1.020, 1.010, 0.997, 0.979],
    },
    MaterialData {
        name: "Admiralty",
        notes: "애드미럴티 황동",
        factors: [1.029, 1.027, 1.024, 1.021, 1.013, 0.998, 0.981, 0.961, 0.932],
    },
    MaterialData {
        name: "Al Brass",
        notes: "알루미늄 황동",
        factors: [1.027, 1.025, 1.021, 1.018, 1.010, 0.993, 0.974, 0.952, 0.921],
    },
    MaterialData {
        name: "Al Bronze",
        notes: "알루미늄 청동",
        factors: [1.021, 1.018, 1.014, 1.009, 0.999, 0.979, 0.956, 0.930, 0.892],
    },
    MaterialData {
        name: "Carbon Steel",
        notes: "탄소강",
        factors: [1.002, 0.998, 0.990, 0.983, 0.967, 0.936, 0.901, 0.863, 0.810],
    },
    MaterialData {
        name: "Cu Ni 90-10",
        notes: "백동 90/10",
        factors: [1.000, 0.995, 0.987, 0.980, 0.963, 0.930, 0.893, 0.854, 0.800],
    },
    MaterialData {
        name: "Cu Ni 70-30",
        notes: "백동 70/30",
        factors: [0.974, 0.967, 0.957, 0.946, 0.922, 0.876, 0.828, 0.777, 0.710],
    },
    MaterialData {
        name: "SS(UNS S43035)",
        notes: "페라이트계 스테인리스",
        factors: [0.959, 0.951, 0.938, 0.926, 0.898, 0.846, 0.792, 0.736, 0.664],
    },
    MaterialData {
        name: "Titanium Grades 1 &2",
        notes: "티타늄 1/2종",
        factors: [0.951, 0.942, 0.928, 0.915, 0.885, 0.830, 0.772, 0.714, 0.640],
    },
    MaterialData {
        name: "SS (UNS S44660)",
        notes: "슈퍼 페라이트계 스테인리스",
        factors: [0.928, 0.917, 0.901, 0.886, 0.851, 0.787, 0.723, 0.659, 0.581],
    },
    MaterialData {
        name: "SS (UNS S44735)",
        notes: "슈퍼 페라이트계 스테인리스",
        factors: [0.926, 0.915, 0.899, 0.883, 0.847, 0.783, 0.718, 0.654, 0.576],
    },
    MaterialData {
        name: "SS TP 304",
        notes: "오스테나이트계 스테인리스",
        factors: [0.910, 0.897, 0.879, 0.862, 0.823, 0.754, 0.685, 0.619, 0.539],
    },
    MaterialData {
        name: "SS TP 316/317",
        notes: "오스테나이트계 스테인리스(Mo)",
        factors: [0.904, 0.891, 0.872, 0.854, 0.815, 0.744, 0.674, 0.607, 0.527],
    },
    MaterialData {
        name: "SS (UNS N08367)",
        notes: "슈퍼 오스테나이트계 스테인리스",
        factors: [0.879, 0.864, 0.843, 0.823, 0.779, 0.702, 0.628, 0.558, 0.477],
    },
    MaterialData {
        name: "ATI 2003 (UNS S32003)",
        notes: "린 듀플렉스",
        factors: [0.927, 0.916, 0.900, 0.884, 0.849, 0.785, 0.721, 0.657, 0.578],
    },
    MaterialData {
        name: "2205 (UNS S31803, S32205)",
        notes: "듀플렉스",
        factors: [0.907, 0.894, 0.876, 0.858, 0.819, 0.749, 0.680, 0.613, 0.533],
    },
    MaterialData {
        name: "2507 (UNS S32750)",
        notes: "슈퍼 듀플렉스",
        factors: [0.911, 0.899, 0.881, 0.864, 0.825, 0.756, 0.688, 0.622, 0.542],
    },
];

// NOTE:
// - 계수는 관벽 열저항 차이를 반영한 참고치이며 설계 확정 시 최신 HEI 표로 검증해야 한다.
// - 격자 밖 두께는 보간하지 않고 상관식 단계에서 거부한다.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_is_monotone_decreasing() {
        for mat in materials() {
            assert!(
                mat.factors.windows(2).all(|w| w[0] >= w[1]),
                "{} factors must fall with thickness",
                mat.name
            );
        }
    }

    #[test]
    fn lookup_ignores_case_and_padding() {
        let mat = find_material("  ss tp 304 ").expect("material");
        assert_eq!(mat.name, "SS TP 304");
        assert!(find_material("Unobtainium").is_none());
    }

    #[test]
    fn names_cover_catalogue() {
        assert_eq!(material_names().len(), 18);
    }
}
