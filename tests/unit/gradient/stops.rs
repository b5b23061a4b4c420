use super::*;

const BLACK: Color = Rgba([0, 0, 0, 65535]);
const WHITE: Color = Rgba([65535, 65535, 65535, 65535]);

fn black_to_white() -> ColorStopTable {
    ColorStopTable::new([(BLACK, 0.0), (WHITE, 1.0)]).unwrap()
}

#[test]
fn binary_search_reports_hits_and_insertion_points() {
    let v = [0.0, 0.25, 1.0];
    assert_eq!(binary_search(&v, 0.25), (1, true));
    assert_eq!(binary_search(&v, 0.5), (2, false));
    assert_eq!(binary_search(&v, -1.0), (0, false));
    assert_eq!(binary_search(&v, 2.0), (3, false));
    assert_eq!(binary_search(&[], 0.5), (0, false));
}

#[test]
fn exact_stop_returns_stop_color_unmodified() {
    let odd = Rgba([1000, 2000, 3000, 65535]);
    let t = ColorStopTable::new([(BLACK, 0.0), (odd, 0.5), (WHITE, 1.0)]).unwrap();
    assert_eq!(t.lookup(0.0), BLACK);
    assert_eq!(t.lookup(0.5), odd);
    assert_eq!(t.lookup(1.0), WHITE);
}

#[test]
fn progress_outside_table_clamps() {
    let grey = Rgba([30000, 30000, 30000, 65535]);
    let t = ColorStopTable::new([(grey, 0.2), (BLACK, 0.6), (WHITE, 1.0)]).unwrap();
    assert_eq!(t.lookup(0.0), grey);
    assert_eq!(t.lookup(-4.0), grey);
    assert_eq!(t.lookup(1.5), WHITE);
    assert_eq!(t.lookup(f64::INFINITY), WHITE);
    assert_eq!(t.lookup(f64::NAN), grey);
}

#[test]
fn midpoint_of_black_to_white_is_mid_grey() {
    let c = black_to_white().lookup(0.5);
    assert_eq!(c, widen8(Rgba([128, 128, 128, 255])));
}

#[test]
fn lower_stop_dominates_near_its_fraction() {
    let t = black_to_white();
    let near_black = t.lookup(0.2).0[0] >> 8;
    let near_white = t.lookup(0.8).0[0] >> 8;
    assert_eq!(near_black, 51);
    assert_eq!(near_white, 204);
}

#[test]
fn fractions_are_normalized_by_last() {
    let t = ColorStopTable::new([(BLACK, 0.0), (WHITE, 2.0), (BLACK, 4.0)]).unwrap();
    assert_eq!(t.fractions(), &[0.0, 0.5, 1.0]);
    assert_eq!(t.len(), 3);
    assert_eq!(t.lookup(0.5), WHITE);
}

#[test]
fn single_stop_is_constant() {
    let red = Rgba([65535, 0, 0, 65535]);
    let t = ColorStopTable::new([(red, 0.0)]).unwrap();
    assert_eq!(t.fractions(), &[1.0]);
    assert_eq!(t.lookup(0.0), red);
    assert_eq!(t.lookup(0.7), red);
    assert_eq!(t.lookup(3.0), red);
}

#[test]
fn duplicate_fractions_make_a_hard_edge() {
    let a = Rgba([1, 1, 1, 1]);
    let b = Rgba([2, 2, 2, 2]);
    let c = Rgba([3, 3, 3, 3]);
    let d = Rgba([4, 4, 4, 4]);
    let t = ColorStopTable::new([(a, 0.0), (b, 0.5), (c, 0.5), (d, 1.0)]).unwrap();
    assert_eq!(t.lookup(0.5), b);
    // Just past the edge interpolates from c toward d.
    let just_after = t.lookup(0.5000001);
    assert_eq!(just_after, widen8(Rgba([0, 0, 0, 0])));
}

#[test]
fn rejects_invalid_tables() {
    let err = ColorStopTable::new(std::iter::empty()).unwrap_err();
    assert!(matches!(err, VirtImgError::Construction(_)));
    assert!(ColorStopTable::new([(BLACK, 0.5), (WHITE, 0.2)]).is_err());
    assert!(ColorStopTable::new([(BLACK, 0.0), (WHITE, f64::NAN)]).is_err());
    assert!(ColorStopTable::new([(BLACK, 0.0), (WHITE, 0.0)]).is_err());
}

#[test]
fn legacy_scale_divides_by_256() {
    let exact = black_to_white();
    let legacy = black_to_white().with_scale(ChannelScale::Legacy);
    assert_eq!(exact.lookup(0.998).0[0] >> 8, 254);
    assert_eq!(legacy.lookup(0.998).0[0] >> 8, 255);
    // Saturates instead of wrapping near the top stop.
    assert_eq!(legacy.lookup(0.9999).0[0] >> 8, 255);
    assert_eq!(legacy.lookup(0.9999).0[3] >> 8, 255);
}

#[test]
fn legacy_scale_truncates() {
    let exact = black_to_white();
    let legacy = black_to_white().with_scale(ChannelScale::Legacy);
    // 32767.5 / 256 = 127.99 truncates; 32767.5 / 257 = 127.5 rounds up.
    assert_eq!(legacy.lookup(0.5), widen8(Rgba([127, 127, 127, 255])));
    assert_eq!(exact.lookup(0.5), widen8(Rgba([128, 128, 128, 255])));
}
