/// 표 기반 상관식에서 공통으로 쓰는 1차원 선형 보간.
/// 격자 밖 질의는 가장자리 값으로 클램프하고 그 사실을 함께 돌려준다.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolated {
    pub value: f64,
    /// 실제로 값을 읽어온 격자 좌표(클램프 시 가장자리 좌표)
    pub source_x: f64,
    /// true면 격자 범위 밖이라 가장자리 값으로 클램프됨을 의미한다.
    pub clamped: bool,
}

/// `xs`는 오름차순이어야 하며 `ys`와 길이가 같아야 한다.
/// 비어 있거나 길이가 다르면 `None`.
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> Option<Interpolated> {
    if xs.is_empty() || xs.len() != ys.len() || x.is_nan() {
        return None;
    }
    let first = xs[0];
    let last = xs[xs.len() - 1];
    if xs.len() == 1 || x < first {
        return Some(Interpolated {
            value: ys[0],
            source_x: first,
            clamped: xs.len() == 1 || x < first,
        });
    }
    if x > last {
        return Some(Interpolated {
            value: ys[ys.len() - 1],
            source_x: last,
            clamped: true,
        });
    }
    for (i, win) in xs.windows(2).enumerate() {
        let (a, b) = (win[0], win[1]);
        if x >= a && x <= b {
            // 격자점과 정확히 일치하면 표 값을 그대로 쓴다
            if x == a {
                return Some(exact(ys[i], a));
            }
            if x == b {
                return Some(exact(ys[i + 1], b));
            }
            let frac = (x - a) / (b - a);
            return Some(Interpolated {
                value: ys[i] + frac * (ys[i + 1] - ys[i]),
                source_x: x,
                clamped: false,
            });
        }
    }
    None
}

fn exact(value: f64, x: f64) -> Interpolated {
    Interpolated {
        value,
        source_x: x,
        clamped: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XS: [f64; 3] = [1.0, 2.0, 4.0];
    const YS: [f64; 3] = [10.0, 20.0, 30.0];

    #[test]
    fn grid_point_returns_table_value() {
        let hit = interpolate(&XS, &YS, 2.0).unwrap();
        assert_eq!(hit.value, 20.0);
        assert!(!hit.clamped);
    }

    #[test]
    fn midpoint_is_linear() {
        let hit = interpolate(&XS, &YS, 3.0).unwrap();
        assert!((hit.value - 25.0).abs() < 1e-12);
    }

    #[test]
    fn outside_grid_clamps_to_edges() {
        let low = interpolate(&XS, &YS, 0.0).unwrap();
        let high = interpolate(&XS, &YS, 9.0).unwrap();
        assert_eq!((low.value, low.clamped), (10.0, true));
        assert_eq!((high.value, high.clamped), (30.0, true));
        assert_eq!(high.source_x, 4.0);
    }

    #[test]
    fn mismatched_tables_are_rejected() {
        assert!(interpolate(&XS, &YS[..2], 1.5).is_none());
        assert!(interpolate(&[], &[], 1.5).is_none());
        assert!(interpolate(&XS, &YS, f64::NAN).is_none());
    }
}
