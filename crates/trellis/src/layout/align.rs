use super::Alignment;
use crate::geom::coerce;

/// Clamp a single axis against optional min/max bounds. When the minimum
/// exceeds the maximum, the maximum wins.
pub fn clamp_axis(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let (min, max) = match (min, max) {
        (Some(min), Some(max)) if min > max => (Some(max), Some(max)),
        other => other,
    };
    let mut value = value;
    if let Some(max) = max {
        value = value.min(max);
    }
    if let Some(min) = min {
        value = value.max(min);
    }
    coerce(value)
}

/// Resolve the origin and extent of a child along one axis.
///
/// `origin` and `available` describe the container span, `preferred` is the
/// child's preferred extent and `margin` its leading and trailing margins.
/// `limits` bound the stretched extent.
pub fn align_span(
    origin: f64,
    available: f64,
    preferred: f64,
    margin: (f64, f64),
    align: Alignment,
    limits: (Option<f64>, Option<f64>),
) -> (f64, f64) {
    let (lead, trail) = margin;
    match align {
        Alignment::Start => (origin + lead, preferred),
        Alignment::Center => (
            origin + (available - (preferred + lead + trail)) / 2.0 + lead,
            preferred,
        ),
        Alignment::End => (origin + available - trail - preferred, preferred),
        Alignment::Stretch | Alignment::Fill => (
            origin + lead,
            clamp_axis(available - lead - trail, limits.0, limits.1),
        ),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::error::Result;

    #[test]
    fn clamp_axis_no_bounds() {
        assert_eq!(clamp_axis(5.0, None, None), 5.0);
    }

    #[test]
    fn clamp_axis_min_greater_than_max() {
        assert_eq!(clamp_axis(1.0, Some(10.0), Some(4.0)), 4.0);
        assert_eq!(clamp_axis(20.0, Some(10.0), Some(4.0)), 4.0);
    }

    #[test]
    fn clamp_axis_never_negative() {
        assert_eq!(clamp_axis(-3.0, None, None), 0.0);
    }

    #[test]
    fn alignment_in_hundred() -> Result<()> {
        let no = (None, None);
        assert_eq!(align_span(0.0, 100.0, 20.0, (0.0, 0.0), Alignment::Start, no), (0.0, 20.0));
        assert_eq!(align_span(0.0, 100.0, 20.0, (0.0, 0.0), Alignment::Center, no), (40.0, 20.0));
        assert_eq!(align_span(0.0, 100.0, 20.0, (0.0, 0.0), Alignment::End, no), (80.0, 20.0));
        assert_eq!(align_span(0.0, 100.0, 20.0, (0.0, 0.0), Alignment::Stretch, no), (0.0, 100.0));
        assert_eq!(align_span(0.0, 100.0, 20.0, (0.0, 0.0), Alignment::Fill, no), (0.0, 100.0));
        Ok(())
    }

    #[test]
    fn alignment_with_margins() -> Result<()> {
        let no = (None, None);
        let m = (5.0, 15.0);
        assert_eq!(align_span(10.0, 100.0, 20.0, m, Alignment::Start, no), (15.0, 20.0));
        assert_eq!(align_span(10.0, 100.0, 20.0, m, Alignment::Center, no), (45.0, 20.0));
        assert_eq!(align_span(10.0, 100.0, 20.0, m, Alignment::End, no), (75.0, 20.0));
        assert_eq!(align_span(10.0, 100.0, 20.0, m, Alignment::Stretch, no), (15.0, 80.0));
        assert_eq!(
            align_span(10.0, 100.0, 20.0, m, Alignment::Stretch, (None, Some(30.0))),
            (15.0, 30.0)
        );
        Ok(())
    }

    proptest! {
        #[test]
        fn stretch_fills_container(avail in 0.0f64..1000.0, lead in 0.0f64..50.0,
                                   trail in 0.0f64..50.0) {
            let (o, s) = align_span(0.0, avail, 0.0, (lead, trail), Alignment::Stretch, (None, None));
            prop_assert_eq!(o, lead);
            prop_assert!(s >= 0.0);
            if avail >= lead + trail {
                prop_assert!((o + s + trail - avail).abs() < 1e-9);
            }
        }

        #[test]
        fn center_is_symmetric(avail in 0.0f64..1000.0, pref in 0.0f64..1000.0) {
            let (o, s) = align_span(0.0, avail, pref, (0.0, 0.0), Alignment::Center, (None, None));
            prop_assert!((o - (avail - (o + s))).abs() < 1e-9);
        }
    }
}
