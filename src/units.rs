//! 복수기 계산에 쓰는 단위 환산.
//!
//! HEI 표는 인치와 ft/s, 설계 입력은 mm와 m/s, 유량은 시간 단위를 섞어 쓰므로
//! 상관식 경계에서만 환산한다. 각 단위는 기준 단위에 대한 배수 하나로 표현한다.

/// 길이 단위. 기준은 mm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Millimeter,
    Meter,
    Inch,
}

impl LengthUnit {
    const fn in_millimeters(self) -> f64 {
        match self {
            LengthUnit::Millimeter => 1.0,
            LengthUnit::Meter => 1000.0,
            LengthUnit::Inch => 25.4,
        }
    }
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    value * from.in_millimeters() / to.in_millimeters()
}

/// mm → m
pub fn mm_to_m(value_mm: f64) -> f64 {
    convert_length(value_mm, LengthUnit::Millimeter, LengthUnit::Meter)
}

/// mm → inch. 0.049 in 같은 두께 격자점이 25.4로 나눈 값과 정확히 맞는다.
pub fn mm_to_inch(value_mm: f64) -> f64 {
    convert_length(value_mm, LengthUnit::Millimeter, LengthUnit::Inch)
}

/// 관내 유속 단위. 기준은 m/s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelocityUnit {
    MeterPerSecond,
    FootPerSecond,
}

impl VelocityUnit {
    const fn in_meters_per_second(self) -> f64 {
        match self {
            VelocityUnit::MeterPerSecond => 1.0,
            VelocityUnit::FootPerSecond => 0.3048,
        }
    }
}

/// 유속을 다른 단위로 변환한다.
pub fn convert_velocity(value: f64, from: VelocityUnit, to: VelocityUnit) -> f64 {
    value * from.in_meters_per_second() / to.in_meters_per_second()
}

const SECONDS_PER_HOUR: f64 = 3600.0;

/// 체적 유량 단위. 기준은 m³/h.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeFlowUnit {
    CubicMeterPerHour,
    CubicMeterPerSecond,
}

impl VolumeFlowUnit {
    const fn per_hour(self) -> f64 {
        match self {
            VolumeFlowUnit::CubicMeterPerHour => 1.0,
            VolumeFlowUnit::CubicMeterPerSecond => SECONDS_PER_HOUR,
        }
    }
}

/// 체적 유량을 변환한다.
pub fn convert_volume_flow(value: f64, from: VolumeFlowUnit, to: VolumeFlowUnit) -> f64 {
    value * from.per_hour() / to.per_hour()
}

/// 질량 유량 단위. 기준은 kg/h.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassFlowUnit {
    KilogramPerHour,
    KilogramPerSecond,
}

impl MassFlowUnit {
    const fn per_hour(self) -> f64 {
        match self {
            MassFlowUnit::KilogramPerHour => 1.0,
            MassFlowUnit::KilogramPerSecond => SECONDS_PER_HOUR,
        }
    }
}

/// 질량 유량을 변환한다.
pub fn convert_mass_flow(value: f64, from: MassFlowUnit, to: MassFlowUnit) -> f64 {
    value * from.per_hour() / to.per_hour()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_thickness_grid_point_survives_conversion() {
        assert_eq!(mm_to_inch(0.049 * 25.4), 0.049);
        assert_eq!(mm_to_m(25.0), 0.025);
    }

    #[test]
    fn table_velocity_limits() {
        let fps = convert_velocity(
            12.0 * 0.3048,
            VelocityUnit::MeterPerSecond,
            VelocityUnit::FootPerSecond,
        );
        assert!((fps - 12.0).abs() < 1e-12);
    }

    #[test]
    fn hourly_flows() {
        let kg_s = convert_mass_flow(
            7200.0,
            MassFlowUnit::KilogramPerHour,
            MassFlowUnit::KilogramPerSecond,
        );
        assert_eq!(kg_s, 2.0);
        let m3_h = convert_volume_flow(
            0.5,
            VolumeFlowUnit::CubicMeterPerSecond,
            VolumeFlowUnit::CubicMeterPerHour,
        );
        assert_eq!(m3_h, 1800.0);
    }
}
