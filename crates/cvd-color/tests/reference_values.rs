//! End-to-end conversions checked against independently computed values.

use approx::assert_abs_diff_eq;
use cvd_color::prelude::*;
use cvd_color::math::Vec3;

fn assert_jab(actual: Jab, expected: [f64; 3]) {
    assert_abs_diff_eq!(actual.j, expected[0], epsilon = 1e-8);
    assert_abs_diff_eq!(actual.a, expected[1], epsilon = 1e-8);
    assert_abs_diff_eq!(actual.b, expected[2], epsilon = 1e-8);
}

fn hex(s: &str) -> Rgb8 {
    Rgb8::from_hex(s).unwrap()
}

#[test]
fn srgb_to_cam02ucs() {
    let model = ColorModel::new().unwrap();
    let cases = [
        ("ff0000", [60.04824046120132, 38.689379932502085, 24.319415791028185]),
        ("00ff00", [87.00421892710477, -32.2333476390791, 30.430598722128966]),
        ("0000ff", [31.22064606063976, -8.383496606546371, -39.15890224235337]),
        ("808080", [56.2288062891048, -1.2648349507222947, -0.761767633086027]),
        ("ffffff", [99.99871678107648, -1.9120089470377741, -1.1514487848409904]),
        ("c04040", [51.15049022419471, 28.595570938960407, 12.845665350950883]),
        ("1f77b4", [48.96646045839393, -12.822347218593537, -23.816727186711585]),
    ];
    for (h, expected) in cases {
        assert_jab(model.rgb8_to_jab(hex(h)).unwrap(), expected);
    }
}

#[test]
fn white_jmh() {
    let model = ColorModel::new().unwrap();
    let xyz = model.linear_to_xyz100(Vec3::ONE);
    let jmh = model.xyz_to_jmh(xyz).unwrap();
    assert_abs_diff_eq!(jmh.j, 99.99781854742498, epsilon = 1e-8);
    assert_abs_diff_eq!(jmh.m, 2.2897187146554754, epsilon = 1e-8);
    assert_abs_diff_eq!(jmh.h, 211.05716453167668, epsilon = 1e-8);
}

#[test]
fn simulated_red() {
    let model = ColorModel::new().unwrap();
    let red = hex("ff0000").to_linear();
    let cases = [
        (CvdKind::Deuteranomaly, [62.63690781065236, -4.622909019355491, 30.442641826057795]),
        (CvdKind::Protanomaly, [42.58870498989294, -3.463271686282586, 24.812094776480127]),
        (CvdKind::Tritanomaly, [61.00801423244059, 48.72641275570006, 22.11983409233958]),
    ];
    for (kind, expected) in cases {
        let m = cvd_matrix(kind, 100).unwrap();
        assert_jab(model.simulate_jab(red, &m).unwrap(), expected);
    }
}

#[test]
fn deutan_collapses_red_green() {
    let model = ColorModel::new().unwrap();
    let red = hex("c04040").to_linear();
    let green = hex("40a040").to_linear();
    let m = cvd_matrix(CvdKind::Deuteranomaly, 100).unwrap();

    let normal = cam02de(
        model.linear_to_jab(red).unwrap(),
        model.linear_to_jab(green).unwrap(),
    );
    let deutan = cam02de(
        model.simulate_jab(red, &m).unwrap(),
        model.simulate_jab(green, &m).unwrap(),
    );
    assert_abs_diff_eq!(normal, 52.19623232037845, epsilon = 1e-8);
    assert_abs_diff_eq!(deutan, 7.641472705952238, epsilon = 1e-8);
}

#[test]
fn gamut_roundtrip() {
    // Linear RGB -> J'a'b' -> linear RGB within 1e-3 relative error
    let model = ColorModel::new().unwrap();
    let steps = [0.02, 0.15, 0.4, 0.65, 0.9, 1.0];
    for &r in &steps {
        for &g in &steps {
            for &b in &steps {
                let rgb = Vec3::new(r, g, b);
                let jab = model.linear_to_jab(rgb).unwrap();
                let back = model.jab_to_linear(jab);
                for i in 0..3 {
                    let err = (back[i] - rgb[i]).abs() / rgb[i];
                    assert!(err < 1e-3, "{rgb:?} -> {back:?}");
                }
            }
        }
    }
}

#[test]
fn undefined_lightness() {
    let model = ColorModel::new().unwrap();
    assert!(model.xyz_to_jmh(Vec3::splat(-5.0)).is_none());
    assert!(model.linear_to_jab(Vec3::splat(-0.05)).is_none());
}
