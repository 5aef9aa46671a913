// ==============================================================================
// render.rs — TEXT NARRATION OF REPORTS (CLI / LOG OUTPUT)
// ------------------------------------------------------------------------------
// Turns a LoadReport or Comparison into tab-separated console tables:
// - render_report(): vehicle summary, roll stiffness, LLT components, corners
// - render_comparison(): baseline vs candidate corners + axle subtotals
//
// Presentation only. Reads the structured report, never the model.
// ==============================================================================

use std::fmt::Write;

use crate::llt::report::{ComparisonRow, LoadReport};
use crate::llt::Comparison;

#[inline]
fn signed(v: f64) -> String {
    if v >= 0.0 { format!("+{v:.2}") } else { format!("{v:.2}") }
}

pub fn render_report(report: &LoadReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, r: &LoadReport) -> std::fmt::Result {
    let v = &r.vehicle;
    let rs = &r.roll_stiffness;
    let llt = &r.load_transfer;

    writeln!(out, "--- Vehicle ---")?;
    writeln!(out, "Total Weight: {:.2} lbs", v.total_weight)?;
    writeln!(out, "Weight Distribution (Front): {:.2}%", v.front_weight_fraction * 100.0)?;
    writeln!(out, "Mass: {:.4} slugs", v.mass)?;
    writeln!(out, "Lateral Acceleration: {:.2} g", v.lateral_acceleration_g)?;
    writeln!(out, "Total Lateral Force: {:.2} lbs", llt.total_lateral_force)?;
    writeln!(out, "Average Track Width: {:.4} ft", llt.average_track_width)?;

    writeln!(out, "\n--- Roll Stiffness ---")?;
    writeln!(
        out,
        "Motion Ratios: LF {:.4}  RF {:.4}  Rear {:.4}",
        r.motion_ratios.front_left, r.motion_ratios.front_right, r.motion_ratios.rear
    )?;
    writeln!(out, "Wheel Rate Left: {:.2} lb/in", rs.wheel_rate_left)?;
    writeln!(out, "Wheel Rate Right: {:.2} lb/in", rs.wheel_rate_right)?;
    writeln!(out, "Front Wheel Rate Average: {:.2} lb/in", rs.front_wheel_rate_avg)?;
    writeln!(out, "ARB Wheel Rate: {:.2} lb/in", rs.arb_wheel_rate)?;
    writeln!(out, "Front Spring Roll Stiffness: {:.2} lb-ft/rad", rs.front_spring_roll_stiffness)?;
    writeln!(out, "Front ARB Roll Stiffness: {:.2} lb-ft/rad", rs.front_arb_roll_stiffness)?;
    writeln!(out, "Front Roll Stiffness: {:.2} lb-ft/rad", rs.front)?;
    writeln!(out, "Front ARB Contribution: {:.2}%", rs.arb_percentage)?;
    writeln!(out, "Rear Wheel Rate: {:.2} lb/in", rs.rear_wheel_rate)?;
    writeln!(out, "Rear Roll Stiffness: {:.2} lb-ft/rad", rs.rear)?;
    writeln!(out, "Total Roll Stiffness: {:.2} lb-ft/rad", rs.total)?;

    writeln!(out, "\n--- LLT Components ---")?;
    writeln!(out, "Total LLT: {:.2} lbs", llt.total)?;
    writeln!(out, "Front Geometric LLT: {:.2} lbs", llt.front_geometric)?;
    writeln!(out, "Rear Geometric LLT: {:.2} lbs", llt.rear_geometric)?;
    writeln!(out, "Elastic LLT: {:.2} lbs", llt.elastic)?;
    writeln!(out, "Front Elastic LLT: {:.2} lbs", llt.front_elastic)?;
    writeln!(out, "Rear Elastic LLT: {:.2} lbs", llt.rear_elastic)?;
    writeln!(out, "Front Total LLT: {:.2} lbs", llt.front)?;
    writeln!(out, "Rear Total LLT: {:.2} lbs", llt.rear)?;

    writeln!(out, "\n--- Dynamic Corner Weights ---")?;
    writeln!(out, "Wheel\tStatic (lbs)\t% Static\tDynamic (lbs)\t% Dynamic\tChange (lbs)\t% Change\tGrip")?;
    for c in &r.weights.corners {
        writeln!(
            out,
            "{}\t{:.2}\t\t{:.2}%\t\t{:.2}\t\t{:.2}%\t\t{}\t\t{}%\t\t{:.2}{}",
            c.corner,
            c.static_weight,
            c.static_pct,
            c.dynamic_weight,
            c.dynamic_pct,
            signed(c.change),
            signed(c.pct_change),
            c.grip.effective_grip,
            if c.lifted { "\tLIFT" } else { "" },
        )?;
    }
    for a in &r.weights.axles {
        writeln!(
            out,
            "{}\t{:.2}\t\t{:.2}%\t\t{:.2}\t\t{:.2}%\t\t{}\t\t{}%\t\t{:.2}",
            a.axle,
            a.static_weight,
            a.static_pct,
            a.dynamic_weight,
            a.dynamic_pct,
            signed(a.change),
            signed(a.pct_change),
            a.effective_grip,
        )?;
    }
    let cross = &r.weights.cross_weight;
    writeln!(
        out,
        "Cross Weight: {:.2}% static, {:.2}% dynamic ({}%)",
        cross.static_pct,
        cross.dynamic_pct,
        signed(cross.change)
    )?;
    Ok(())
}

fn write_row<K: std::fmt::Display>(out: &mut String, row: &ComparisonRow<K>) -> std::fmt::Result {
    writeln!(
        out,
        "{}\t{:.2}\t\t{:.2}%\t\t{:.2}\t\t{:.2}%\t\t{}",
        row.key,
        row.baseline,
        row.baseline_pct,
        row.candidate,
        row.candidate_pct,
        signed(row.difference),
    )
}

pub fn render_comparison(cmp: &Comparison) -> String {
    let mut out = String::new();
    let _ = write_comparison(&mut out, cmp);
    out
}

fn write_comparison(out: &mut String, cmp: &Comparison) -> std::fmt::Result {
    let header = "Vehicle 1 (lbs)\t% of Total\tVehicle 2 (lbs)\t% of Total\tDifference (lbs)";

    writeln!(out, "--- Dynamic Corner Weights Comparison ---")?;
    writeln!(out, "Wheel\t{header}")?;
    for row in &cmp.corners {
        write_row(out, row)?;
    }
    writeln!(out, "\nAxle\t{header}")?;
    for row in &cmp.axles {
        write_row(out, row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{Vehicle, VehicleConfig};

    #[test]
    fn report_mentions_every_corner() {
        let mut car = Vehicle::new(VehicleConfig::reference()).unwrap();
        let text = render_report(&car.report().unwrap());
        for corner in ["LF\t", "RF\t", "LR\t", "RR\t", "Front\t", "Rear\t"] {
            assert!(text.contains(corner), "missing row {corner:?}");
        }
        assert!(text.contains("Total LLT: 1040.00 lbs"));
        assert!(!text.contains("LIFT"));
    }

    #[test]
    fn comparison_has_signed_differences() {
        let mut a = Vehicle::new(VehicleConfig::reference()).unwrap();
        let mut b = Vehicle::new(VehicleConfig::stiffer_arb()).unwrap();
        let text = render_comparison(&a.compare_to(&mut b).unwrap());
        assert!(text.starts_with("--- Dynamic Corner Weights Comparison ---"));
        assert_eq!(text.lines().filter(|l| l.starts_with("Front\t")).count(), 1);
        assert!(text.contains('+') || text.contains('-'));
    }

    #[test]
    fn lifted_wheel_is_flagged() {
        let mut cfg = VehicleConfig::reference();
        cfg.lateral_acceleration_g = 6.0;
        let mut car = Vehicle::new(cfg).unwrap();
        assert!(render_report(&car.report().unwrap()).contains("LIFT"));
    }
}
