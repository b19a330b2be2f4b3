use proptest::prelude::*;

use tank_mass_calculator::{
    correction::{
        bilinear_interpolate_vcf, find_bracket, linear_interpolate, lookup_pcf,
        lookup_reference_volume, Bracket,
    },
    models::{HeightCapacityRow, HeightCapacityTable, PcfRow, PcfTable, VcfGrid},
};

fn grid() -> VcfGrid {
    VcfGrid::new(
        vec![0.0, 10.0, 20.0, 30.0],
        vec![0.50, 0.53, 0.56, 0.59],
        vec![
            vec![1.068, 1.059, 1.050, 1.041],
            vec![1.034, 1.0295, 1.025, 1.0205],
            vec![1.0, 1.0, 1.0, 1.0],
            vec![0.966, 0.9705, 0.975, 0.9795],
        ],
    )
    .unwrap()
}

fn heights() -> HeightCapacityTable {
    HeightCapacityTable::new(vec![
        HeightCapacityRow { height_mm: 0.0, capacity_l: 0.0 },
        HeightCapacityRow { height_mm: 200.0, capacity_l: 4000.0 },
        HeightCapacityRow { height_mm: 557.0, capacity_l: 19778.5 },
        HeightCapacityRow { height_mm: 1114.0, capacity_l: 39557.0 },
    ])
    .unwrap()
}

proptest! {
    #[test]
    fn linear_hits_both_endpoints(x0 in -100.0f64..100.0, dx in 0.1f64..50.0, y0 in -5.0f64..5.0, y1 in -5.0f64..5.0) {
        let x1 = x0 + dx;
        prop_assert!((linear_interpolate(x0, x0, x1, y0, y1) - y0).abs() < 1e-9);
        prop_assert!((linear_interpolate(x1, x0, x1, y0, y1) - y1).abs() < 1e-9);
    }

    #[test]
    fn linear_stays_between_endpoints(t in 0.0f64..=1.0, y0 in -5.0f64..5.0, y1 in -5.0f64..5.0) {
        let y = linear_interpolate(10.0 + 4.0 * t, 10.0, 14.0, y0, y1);
        prop_assert!(y >= y0.min(y1) - 1e-12);
        prop_assert!(y <= y0.max(y1) + 1e-12);
    }

    #[test]
    fn bilinear_bounded_by_cell_corners(t in 0.0f64..=30.0, rho in 0.50f64..=0.59) {
        let grid = grid();
        let vcf = bilinear_interpolate_vcf(t, rho, &grid);
        let all: Vec<f64> = grid.rows().iter().flatten().copied().collect();
        let lo = all.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = all.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(vcf >= lo - 1e-12 && vcf <= hi + 1e-12);
    }

    #[test]
    fn bilinear_reproduces_grid_points(i in 0usize..4, j in 0usize..4) {
        let grid = grid();
        let t = grid.temperatures()[i];
        let rho = grid.densities()[j];
        prop_assert_eq!(bilinear_interpolate_vcf(t, rho, &grid), grid.value(i, j));
    }

    #[test]
    fn bracket_contains_query(q in 0.0f64..=30.0) {
        let axis = [0.0, 10.0, 20.0, 30.0];
        match find_bracket(&axis, q, |v| *v) {
            Bracket::Exact(i) => prop_assert_eq!(axis[i], q),
            Bracket::Between(lo, hi) => {
                prop_assert_eq!(hi, lo + 1);
                prop_assert!(axis[lo] <= q && q <= axis[hi]);
            }
            Bracket::OutOfRange => prop_assert!(false, "{} should be bracketed", q),
        }
    }

    #[test]
    fn bracket_outside_axis_is_out_of_range(q in 30.001f64..1000.0) {
        let axis = [0.0, 10.0, 20.0, 30.0];
        prop_assert_eq!(find_bracket(&axis, q, |v| *v), Bracket::OutOfRange);
        prop_assert_eq!(find_bracket(&axis, -q, |v| *v), Bracket::OutOfRange);
    }

    #[test]
    fn reference_volume_clamped_and_monotone(h1 in -500.0f64..2000.0, h2 in -500.0f64..2000.0) {
        let table = heights();
        let (lo, hi) = if h1 <= h2 { (h1, h2) } else { (h2, h1) };
        let v_lo = lookup_reference_volume(lo, &table);
        let v_hi = lookup_reference_volume(hi, &table);
        prop_assert!((0.0..=39557.0).contains(&v_lo));
        prop_assert!((0.0..=39557.0).contains(&v_hi));
        prop_assert!(v_lo <= v_hi + 1e-9);
    }

    #[test]
    fn pcf_extrapolation_follows_end_to_end_line(p in 24.5f64..60.0) {
        let table = PcfTable::new(vec![
            PcfRow { pressure_bar: 10.0, factor: 1.0084 },
            PcfRow { pressure_bar: 17.0, factor: 1.0 },
            PcfRow { pressure_bar: 24.0, factor: 0.9916 },
        ])
        .unwrap();
        let expected = linear_interpolate(p, 10.0, 24.0, 1.0084, 0.9916);
        prop_assert!((lookup_pcf(p, &table) - expected).abs() < 1e-12);
    }
}
