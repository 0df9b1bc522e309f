use biomechanics::BodyModel;
use bodycore::{BodyParameters, JointAngles};
use plotters::prelude::*;

fn draw_family(
    filename: &str,
    title: &str,
    x_label: &str,
    y_label: &str,
    series: &[(String, Vec<(f64, f64)>)],
    marker: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(filename, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let points = series.iter().flat_map(|(_, pts)| pts.iter());
    let (x_min, x_max, y_min, y_max) = points.fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(x0, x1, y0, y1), (x, y)| (x0.min(*x), x1.max(*x), y0.min(*y), y1.max(*y)),
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("Arial", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart.configure_mesh().x_desc(x_label).y_desc(y_label).draw()?;

    for (i, (label, pts)) in series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(pts.iter().cloned(), &color))?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    if let Some(x) = marker {
        chart.draw_series(LineSeries::new(vec![(x, y_min), (x, y_max)], &BLACK))?;
    }

    chart.configure_series_labels().border_style(&BLACK).draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reference subject (62 kg)
    let measured_femur_length = 0.4191;
    let base = BodyParameters::new(62.0, 0.2286, 0.5715, measured_femur_length, 0.381, 0.7366)
        .with_foot(0.142, 0.08);

    // 1) CoM_x vs femur length, one curve per leg angle (femur and torso compensated)
    let mut family = Vec::new();
    let mut angles = JointAngles::new(38.0, -95.0, 30.0, 180.0);
    while angles.leg < 90.0 {
        let mut pts = Vec::new();
        let mut femur_length = base.leg_length / 2.0;
        while femur_length < base.torso_length {
            let model = BodyModel::new(base.with_femur_length(femur_length))?;
            pts.push((femur_length, model.center_of_mass_at(&angles)?.x));
            femur_length += 0.01;
        }
        family.push((format!("leg angle {}°", angles.leg), pts));
        angles = angles.shifted_leg(10.0);
    }

    draw_family(
        "com_x_vs_femur_length.png",
        "CoM x vs Femur Length and Leg Angle",
        "Femur length [m]",
        "CoM x [m]",
        &family,
        Some(measured_femur_length),
    )?;

    // 2) CoM_x vs torso angle
    let model = BodyModel::new(base)?;
    let mut pts = Vec::new();
    for torso in 0..90 {
        let angles = JointAngles::new(38.0, -95.0, torso as f64, 180.0);
        pts.push((torso as f64, model.center_of_mass_at(&angles)?.x));
    }

    draw_family(
        "com_x_vs_torso_angle.png",
        "CoM x vs Torso Angle",
        "Torso angle [deg]",
        "CoM x [m]",
        &[("reference subject".to_string(), pts)],
        None,
    )?;

    println!("Wrote plots: com_x_vs_femur_length.png, com_x_vs_torso_angle.png");

    Ok(())
}
